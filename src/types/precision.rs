// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature step precision.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

const EPSILON: f64 = 1e-9;

/// Granularity of a temperature dimension.
///
/// Device profiles declare their native step as a plain number (`0.1`, `0.5`,
/// `1`, or a coarser step of 2 or more); any other value is rejected with
/// [`ValueError::InvalidPrecision`].
///
/// # Examples
///
/// ```
/// use irclimate_lib::Precision;
///
/// let half = Precision::from_value(0.5).unwrap();
/// assert_eq!(half, Precision::Half);
/// assert_eq!(half.round(21.3), 21.5);
///
/// assert!(Precision::from_value(0.3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precision {
    /// Tenth of a degree (0.1).
    Tenth,
    /// Half a degree (0.5).
    Half,
    /// Whole degrees (1).
    Whole,
    /// A custom step of 2 degrees or more.
    Step(f64),
}

impl Precision {
    /// The coarse two-degree step produced by cross-unit step mapping.
    pub const DOUBLE: Self = Self::Step(2.0);

    /// Creates a precision from the numeric value used in device profiles.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidPrecision`] for values other than 0.1,
    /// 0.5, 1 or a step ≥ 2.
    pub fn from_value(value: f64) -> Result<Self, ValueError> {
        if (value - 0.1).abs() < EPSILON {
            Ok(Self::Tenth)
        } else if (value - 0.5).abs() < EPSILON {
            Ok(Self::Half)
        } else if (value - 1.0).abs() < EPSILON {
            Ok(Self::Whole)
        } else if value >= 2.0 && value.is_finite() {
            Ok(Self::Step(value))
        } else {
            Err(ValueError::InvalidPrecision(value))
        }
    }

    /// Returns the numeric step size.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Tenth => 0.1,
            Self::Half => 0.5,
            Self::Whole => 1.0,
            Self::Step(step) => *step,
        }
    }

    /// Rounds a temperature to this precision.
    ///
    /// Tenths round to one decimal place, halves to the nearest 0.5, whole
    /// to the nearest integer, and a custom step to the nearest multiple of
    /// that step.
    #[must_use]
    pub fn round(&self, temperature: f64) -> f64 {
        match self {
            Self::Tenth => (temperature * 10.0).round() / 10.0,
            Self::Half => (temperature * 2.0).round() / 2.0,
            Self::Whole => temperature.round(),
            Self::Step(step) => (temperature / step).round() * step,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Precision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature unit handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A temperature unit.
///
/// Device profiles declare the unit their code table is keyed in; the host
/// runtime has its own unit. Every translation between the two goes through
/// [`temperature::convert`](crate::temperature::convert).
///
/// # Examples
///
/// ```
/// use irclimate_lib::TemperatureUnit;
///
/// let unit: TemperatureUnit = "C".parse().unwrap();
/// assert_eq!(unit, TemperatureUnit::Celsius);
/// assert_eq!(unit.as_str(), "C");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[serde(rename = "C")]
    Celsius,
    /// Degrees Fahrenheit.
    #[serde(rename = "F")]
    Fahrenheit,
    /// Kelvin.
    #[serde(rename = "K")]
    Kelvin,
}

impl TemperatureUnit {
    /// Returns the single-letter representation used in device profiles.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
            Self::Kelvin => "K",
        }
    }

    /// Returns the display symbol for this unit.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }

    /// Returns `true` for Celsius and Kelvin.
    ///
    /// The two share degree size, so step granularity translates 1:1 between
    /// them while a Fahrenheit crossing changes it.
    #[must_use]
    pub const fn is_metric(&self) -> bool {
        matches!(self, Self::Celsius | Self::Kelvin)
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" | "°C" | "celsius" => Ok(Self::Celsius),
            "F" | "°F" | "fahrenheit" => Ok(Self::Fahrenheit),
            "K" | "kelvin" => Ok(Self::Kelvin),
            _ => Err(ValueError::InvalidUnit(s.to_string())),
        }
    }
}

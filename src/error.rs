// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `irclimate` library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: value validation, command resolution, profile parsing,
//! and controller transmission.

use std::fmt;

use thiserror::Error;

use crate::types::HvacMode;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when working
/// with IR climate devices.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while resolving a command for a requested state.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Error occurred while parsing or validating a device profile.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Error reported by the controller while transmitting a code.
    #[error("controller error: {0}")]
    Controller(#[from] ControllerError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A temperature input is not a finite number.
    #[error("invalid temperature: {0}")]
    InvalidTemperature(String),

    /// A numeric precision value is not one of the supported steps.
    ///
    /// Supported steps are 0.1, 0.5, 1 and any step of 2 or more.
    #[error("invalid precision: {0}")]
    InvalidPrecision(f64),

    /// A target temperature is outside the device's supported range.
    #[error("temperature {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum supported temperature.
        min: f64,
        /// Maximum supported temperature.
        max: f64,
        /// The actual value that was requested.
        actual: f64,
    },

    /// An invalid hvac mode string was provided.
    #[error("invalid hvac mode: {0}")]
    InvalidHvacMode(String),

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An invalid temperature unit string was provided.
    #[error("invalid temperature unit: {0}")]
    InvalidUnit(String),
}

/// The dimension of a command-tree lookup.
///
/// Named in [`ResolveError::MissingCommand`] so a caller can report which
/// part of the requested state could not be matched against the device's
/// code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// The on/off power level.
    Power,
    /// The hvac operation mode level.
    Mode,
    /// The preset mode level.
    Preset,
    /// The fan mode level.
    Fan,
    /// The swing mode level.
    Swing,
    /// The target temperature level.
    Temperature,
}

impl Dimension {
    /// Returns the human-readable name of the dimension.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Mode => "operation mode",
            Self::Preset => "preset mode",
            Self::Fan => "fan mode",
            Self::Swing => "swing mode",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors produced while resolving a requested state into a code.
///
/// A resolution failure is always all-or-nothing: no code is returned and
/// the device state is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// The requested hvac mode is not declared by the device profile.
    #[error("hvac mode '{0}' is not supported by this device")]
    UnsupportedMode(HvacMode),

    /// The requested preset mode is not declared by the device profile.
    #[error("preset mode '{0}' is not supported by this device")]
    UnsupportedPreset(String),

    /// The requested fan mode is not declared by the device profile.
    #[error("fan mode '{0}' is not supported by this device")]
    UnsupportedFan(String),

    /// The requested swing mode is not declared by the device profile.
    #[error("swing mode '{0}' is not supported by this device")]
    UnsupportedSwing(String),

    /// No code exists in the device's command table for an otherwise valid
    /// combination of settings.
    #[error("missing device code for {dimension} '{value}'")]
    MissingCommand {
        /// The dimension that could not be matched.
        dimension: Dimension,
        /// The requested value at that dimension.
        value: String,
    },

    /// A temperature value failed validation or conversion.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Errors related to parsing and validating a device profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The profile declares no operation modes.
    #[error("profile declares no operation modes")]
    NoOperationModes,

    /// The declared temperature range is inverted.
    #[error("minTemperature {min} exceeds maxTemperature {max}")]
    InvertedRange {
        /// Declared minimum temperature, device-native unit.
        min: f64,
        /// Declared maximum temperature, device-native unit.
        max: f64,
    },
}

/// Errors reported by a [`Controller`](crate::Controller) implementation.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The underlying transport failed to transmit the code.
    #[error("transmission failed: {0}")]
    SendFailed(String),

    /// The controller is not connected to its transport.
    #[error("controller is not connected")]
    NotConnected,

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

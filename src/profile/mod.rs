// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device profiles.
//!
//! A [`DeviceProfile`] is the immutable, validated in-memory representation
//! of one remote-controlled device: the settings it supports (operation,
//! preset, fan and swing modes, temperature range and step) and the command
//! tree holding the raw code for each combination. Profiles are loaded once
//! from JSON when a device is configured and shared read-only afterwards.

mod command_tree;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ProfileError, ValueError};
use crate::temperature;
use crate::types::{HvacMode, Precision, TemperatureUnit};

pub use command_tree::{CommandNode, WILDCARD, closest_temperature, resolve_choice};

/// Capabilities and command table of one IR/RF climate device.
///
/// # Examples
///
/// ```
/// use irclimate_lib::{DeviceProfile, HvacMode, TemperatureUnit};
///
/// let profile = DeviceProfile::from_json(
///     r#"{
///         "temperatureUnit": "C",
///         "precision": 1,
///         "minTemperature": 16,
///         "maxTemperature": 30,
///         "operationModes": ["cool", "heat"],
///         "commands": {
///             "off": "CODE_OFF",
///             "cool": {"20": "CODE_COOL_20"}
///         }
///     }"#,
/// )
/// .unwrap();
///
/// assert!(profile.supports_mode(HvacMode::Cool));
/// assert!(profile.supports_mode(HvacMode::Off));
/// assert!(!profile.supports_mode(HvacMode::Dry));
/// assert!(!profile.supports_presets());
/// assert_eq!(profile.temperature_unit(), TemperatureUnit::Celsius);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    /// Device manufacturer, informational only.
    #[serde(default)]
    manufacturer: Option<String>,

    /// Model names this code table applies to, informational only.
    #[serde(default)]
    supported_models: Vec<String>,

    /// Encoding of the code blobs (e.g. "Base64", "Pronto"), informational
    /// for the controller layer.
    #[serde(default)]
    commands_encoding: Option<String>,

    /// Unit the command-table temperature keys and bounds are expressed in.
    temperature_unit: TemperatureUnit,

    /// Native temperature step of the device.
    precision: Precision,

    /// Lowest supported temperature, native unit.
    min_temperature: f64,

    /// Highest supported temperature, native unit.
    max_temperature: f64,

    /// Supported hvac modes. "off" is implicit and always supported.
    operation_modes: Vec<HvacMode>,

    #[serde(default)]
    preset_modes: Option<Vec<String>>,

    #[serde(default)]
    fan_modes: Option<Vec<String>>,

    #[serde(default)]
    swing_modes: Option<Vec<String>>,

    /// The code lookup tree, keyed by mode/preset/fan/swing/temperature.
    commands: IndexMap<String, CommandNode>,
}

impl DeviceProfile {
    /// Parses and validates a profile from its JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Json`] on malformed JSON and the other
    /// [`ProfileError`] variants on semantic problems (no operation modes,
    /// inverted temperature range).
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()
    }

    /// Validates a profile deserialized from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`DeviceProfile::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_value(value)?;
        profile.validate()
    }

    fn validate(mut self) -> Result<Self, ProfileError> {
        self.operation_modes.retain(|mode| *mode != HvacMode::Off);
        if self.operation_modes.is_empty() {
            return Err(ProfileError::NoOperationModes);
        }
        if self.min_temperature > self.max_temperature {
            return Err(ProfileError::InvertedRange {
                min: self.min_temperature,
                max: self.max_temperature,
            });
        }
        // An empty list means the capability is absent, same as omitting it.
        for modes in [&mut self.preset_modes, &mut self.fan_modes, &mut self.swing_modes] {
            if modes.as_ref().is_some_and(Vec::is_empty) {
                *modes = None;
            }
        }
        Ok(self)
    }

    /// Returns the device manufacturer, if declared.
    #[must_use]
    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    /// Returns the model names this code table applies to.
    #[must_use]
    pub fn supported_models(&self) -> &[String] {
        &self.supported_models
    }

    /// Returns the declared encoding of the code blobs, if any.
    #[must_use]
    pub fn commands_encoding(&self) -> Option<&str> {
        self.commands_encoding.as_deref()
    }

    /// Returns the device-native temperature unit.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }

    /// Returns the device-native temperature step.
    #[must_use]
    pub fn native_step(&self) -> Precision {
        self.precision
    }

    /// Returns the temperature step to expose in the given host unit.
    #[must_use]
    pub fn host_step(&self, host_unit: TemperatureUnit) -> Precision {
        temperature::host_step(self.precision, self.temperature_unit, host_unit)
    }

    /// Returns the lowest supported temperature, converted to the host unit
    /// and rounded at the host-facing step.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemperature`] if the declared bound is
    /// not a finite number.
    pub fn min_temperature_in(&self, host_unit: TemperatureUnit) -> Result<f64, ValueError> {
        temperature::convert(
            self.min_temperature,
            self.temperature_unit,
            host_unit,
            Some(self.host_step(host_unit)),
        )
    }

    /// Returns the highest supported temperature, converted to the host unit
    /// and rounded at the host-facing step.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemperature`] if the declared bound is
    /// not a finite number.
    pub fn max_temperature_in(&self, host_unit: TemperatureUnit) -> Result<f64, ValueError> {
        temperature::convert(
            self.max_temperature,
            self.temperature_unit,
            host_unit,
            Some(self.host_step(host_unit)),
        )
    }

    /// Returns the supported hvac modes, not counting the implicit "off".
    #[must_use]
    pub fn operation_modes(&self) -> &[HvacMode] {
        &self.operation_modes
    }

    /// Returns whether a mode can be requested on this device.
    ///
    /// [`HvacMode::Off`] is always supported.
    #[must_use]
    pub fn supports_mode(&self, mode: HvacMode) -> bool {
        mode == HvacMode::Off || self.operation_modes.contains(&mode)
    }

    /// Returns the declared preset modes, or `None` if the device has none.
    #[must_use]
    pub fn preset_modes(&self) -> Option<&[String]> {
        self.preset_modes.as_deref()
    }

    /// Returns the declared fan modes, or `None` if the device has none.
    #[must_use]
    pub fn fan_modes(&self) -> Option<&[String]> {
        self.fan_modes.as_deref()
    }

    /// Returns the declared swing modes, or `None` if the device has none.
    #[must_use]
    pub fn swing_modes(&self) -> Option<&[String]> {
        self.swing_modes.as_deref()
    }

    /// Returns whether the device supports preset modes.
    #[must_use]
    pub fn supports_presets(&self) -> bool {
        self.preset_modes.is_some()
    }

    /// Returns whether the device supports fan modes.
    #[must_use]
    pub fn supports_fan(&self) -> bool {
        self.fan_modes.is_some()
    }

    /// Returns whether the device supports swing modes.
    #[must_use]
    pub fn supports_swing(&self) -> bool {
        self.swing_modes.is_some()
    }

    /// Returns the root of the command tree.
    #[must_use]
    pub fn commands(&self) -> &IndexMap<String, CommandNode> {
        &self.commands
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate device state tracking.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::profile::DeviceProfile;
use crate::types::{HvacAction, HvacMode, PowerState, TemperatureUnit};

/// Tracked state of a climate device.
///
/// `hvac_mode` is the last mode used while on; while the device is off it
/// is the mode transmission will resume with. The optional mode fields are
/// `None` when the device profile does not declare the capability.
/// `target_temperature` is kept in the host's unit.
///
/// The state is owned by the caller layer and must only be committed after
/// a resolved command has actually been transmitted; resolution itself
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateState {
    /// Whether the device is on or off.
    pub power: PowerState,
    /// Last operation mode used while on.
    pub hvac_mode: HvacMode,
    /// Current preset mode, if the device supports presets.
    pub preset_mode: Option<String>,
    /// Current fan mode, if the device supports fan control.
    pub fan_mode: Option<String>,
    /// Current swing mode, if the device supports swing control.
    pub swing_mode: Option<String>,
    /// Target temperature, host unit.
    pub target_temperature: f64,
    /// Latest reading from an ambient temperature sensor, host unit.
    pub current_temperature: Option<f64>,
    /// Latest reading from an ambient humidity sensor, percent.
    pub current_humidity: Option<f64>,
}

impl ClimateState {
    /// Creates the initial state for a freshly configured device.
    ///
    /// The device starts off, in the first declared operation mode, with the
    /// first entry of each declared modes list selected and the target set
    /// to the device's minimum temperature in the host unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemperature`] if the profile's minimum
    /// temperature cannot be converted to the host unit.
    pub fn initial(profile: &DeviceProfile, host_unit: TemperatureUnit) -> Result<Self, ValueError> {
        let first = |modes: Option<&[String]>| modes.and_then(|m| m.first()).cloned();
        Ok(Self {
            power: PowerState::Off,
            hvac_mode: profile.operation_modes().first().copied().unwrap_or(HvacMode::Off),
            preset_mode: first(profile.preset_modes()),
            fan_mode: first(profile.fan_modes()),
            swing_mode: first(profile.swing_modes()),
            target_temperature: profile.min_temperature_in(host_unit)?,
            current_temperature: None,
            current_humidity: None,
        })
    }

    /// Derives the observed hvac action from this state.
    ///
    /// A pure projection: off maps to [`HvacAction::Off`]; a heat-capable
    /// mode below target maps to heating, a cool-capable mode above target
    /// to cooling, dry above target to drying, fan-only to fan, anything
    /// else to idle. Requires a live current-temperature reading; without
    /// one no action can be derived and `None` is returned.
    #[must_use]
    pub fn hvac_action(&self, profile: &DeviceProfile) -> Option<HvacAction> {
        let current = self.current_temperature?;
        if self.power == PowerState::Off {
            return Some(HvacAction::Off);
        }
        let action = if self.hvac_mode.can_heat()
            && current < self.target_temperature
            && profile.supports_mode(HvacMode::Heat)
        {
            HvacAction::Heating
        } else if self.hvac_mode.can_cool()
            && current > self.target_temperature
            && profile.supports_mode(HvacMode::Cool)
        {
            HvacAction::Cooling
        } else if self.hvac_mode == HvacMode::Dry && current > self.target_temperature {
            HvacAction::Drying
        } else if self.hvac_mode == HvacMode::FanOnly {
            HvacAction::Fan
        } else {
            HvacAction::Idle
        };
        Some(action)
    }

    /// Restores fields from a previously persisted state, keeping only the
    /// values the profile still declares and a target within bounds.
    ///
    /// Unknown modes and out-of-range temperatures are dropped silently, so
    /// a profile change between restarts cannot leave the state invalid.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemperature`] if the profile bounds
    /// cannot be converted to the host unit.
    pub fn restore(
        &mut self,
        saved: &Self,
        profile: &DeviceProfile,
        host_unit: TemperatureUnit,
    ) -> Result<(), ValueError> {
        self.power = saved.power;
        if profile.supports_mode(saved.hvac_mode) && saved.hvac_mode != HvacMode::Off {
            self.hvac_mode = saved.hvac_mode;
        }

        let keep = |declared: Option<&[String]>, value: &Option<String>| {
            match (declared, value) {
                (Some(modes), Some(v)) if modes.contains(v) => Some(v.clone()),
                _ => None,
            }
        };
        if let Some(preset) = keep(profile.preset_modes(), &saved.preset_mode) {
            self.preset_mode = Some(preset);
        }
        if let Some(fan) = keep(profile.fan_modes(), &saved.fan_mode) {
            self.fan_mode = Some(fan);
        }
        if let Some(swing) = keep(profile.swing_modes(), &saved.swing_mode) {
            self.swing_mode = Some(swing);
        }

        let min = profile.min_temperature_in(host_unit)?;
        let max = profile.max_temperature_in(host_unit)?;
        if saved.target_temperature >= min && saved.target_temperature <= max {
            self.target_temperature = saved.target_temperature;
        }
        self.current_temperature = saved.current_temperature;
        self.current_humidity = saved.current_humidity;
        Ok(())
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command resolution.
//!
//! [`resolve`] walks a device's command tree for a requested state change
//! and returns the exact code(s) to transmit together with the normalized
//! resulting state. It is a pure function over the profile and the current
//! state: nothing is transmitted and nothing is mutated here. Dimensions are
//! resolved in fixed order (power, operation mode, preset, fan, swing,
//! temperature) because each level narrows the subtree the next one searches.
//!
//! Any failure aborts the whole resolution: no partial code list is ever
//! returned.

use tracing::debug;

use crate::error::{Dimension, ResolveError, ValueError};
use crate::profile::{CommandNode, DeviceProfile, WILDCARD, closest_temperature, resolve_choice};
use crate::state::ClimateState;
use crate::temperature::convert;
use crate::types::{HvacMode, PowerState, TemperatureUnit};

/// A requested state change.
///
/// Every field is optional; `None` means "keep the current value". Selecting
/// an operation mode implies powering on, and requesting [`HvacMode::Off`]
/// is the same as requesting power off while remembering the current mode
/// for later resumption.
///
/// # Examples
///
/// ```
/// use irclimate_lib::{HvacMode, ResolveRequest};
///
/// let request = ResolveRequest::new()
///     .with_hvac_mode(HvacMode::Cool)
///     .with_target_temperature(21.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveRequest {
    /// Requested power state.
    pub power: Option<PowerState>,
    /// Requested operation mode.
    pub hvac_mode: Option<HvacMode>,
    /// Requested preset mode.
    pub preset_mode: Option<String>,
    /// Requested fan mode.
    pub fan_mode: Option<String>,
    /// Requested swing mode.
    pub swing_mode: Option<String>,
    /// Requested target temperature, host unit.
    pub target_temperature: Option<f64>,
}

impl ResolveRequest {
    /// Creates an empty request that keeps every current value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a power state.
    #[must_use]
    pub fn with_power(mut self, power: PowerState) -> Self {
        self.power = Some(power);
        self
    }

    /// Requests an operation mode.
    #[must_use]
    pub fn with_hvac_mode(mut self, mode: HvacMode) -> Self {
        self.hvac_mode = Some(mode);
        self
    }

    /// Requests a preset mode.
    #[must_use]
    pub fn with_preset_mode(mut self, preset: impl Into<String>) -> Self {
        self.preset_mode = Some(preset.into());
        self
    }

    /// Requests a fan mode.
    #[must_use]
    pub fn with_fan_mode(mut self, fan: impl Into<String>) -> Self {
        self.fan_mode = Some(fan.into());
        self
    }

    /// Requests a swing mode.
    #[must_use]
    pub fn with_swing_mode(mut self, swing: impl Into<String>) -> Self {
        self.swing_mode = Some(swing.into());
        self
    }

    /// Requests a target temperature in the host unit.
    #[must_use]
    pub fn with_target_temperature(mut self, temperature: f64) -> Self {
        self.target_temperature = Some(temperature);
        self
    }
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The codes to transmit, in order. May be empty when an idempotent
    /// power toggle was deduplicated.
    pub codes: Vec<String>,
    /// The normalized state to commit once every code has been sent.
    pub state: ClimateState,
}

/// Resolves a requested state change into the code(s) to transmit.
///
/// On success the returned [`Resolution`] carries the ordered code list and
/// the normalized resulting state, holding resolved fallback values rather
/// than the originally requested ones. The caller owns the transmission and must
/// commit the state only after every code went out.
///
/// # Errors
///
/// - [`ResolveError::UnsupportedMode`] and friends when a requested value is
///   not declared by the profile.
/// - [`ResolveError::MissingCommand`] when the command tree has no code for
///   an otherwise valid combination, naming the dimension that failed.
/// - [`ResolveError::Value`] when the target temperature is not finite or
///   out of the device's range.
pub fn resolve(
    profile: &DeviceProfile,
    current: &ClimateState,
    request: &ResolveRequest,
    host_unit: TemperatureUnit,
) -> Result<Resolution, ResolveError> {
    // Selecting a mode implies power on; selecting "off" means power off
    // while keeping the current mode for resumption.
    let (power, mode) = match (request.power, request.hvac_mode) {
        (_, Some(HvacMode::Off)) => (PowerState::Off, current.hvac_mode),
        (Some(power), Some(mode)) => (power, mode),
        (Some(power), None) => (power, current.hvac_mode),
        (None, Some(mode)) => (PowerState::On, mode),
        (None, None) => (current.power, current.hvac_mode),
    };

    if !profile.supports_mode(mode) {
        return Err(ResolveError::UnsupportedMode(mode));
    }
    validate_choice(request.preset_mode.as_deref(), profile.preset_modes(), |v| {
        ResolveError::UnsupportedPreset(v)
    })?;
    validate_choice(request.fan_mode.as_deref(), profile.fan_modes(), |v| {
        ResolveError::UnsupportedFan(v)
    })?;
    validate_choice(request.swing_mode.as_deref(), profile.swing_modes(), |v| {
        ResolveError::UnsupportedSwing(v)
    })?;

    let target = request.target_temperature.unwrap_or(current.target_temperature);
    let min = profile.min_temperature_in(host_unit)?;
    let max = profile.max_temperature_in(host_unit)?;
    if target < min || target > max {
        return Err(ValueError::OutOfRange { min, max, actual: target }.into());
    }

    if power == PowerState::Off {
        // No tree walk happens while off; the requested settings are still
        // committed so they take effect on the next power-on.
        let mut state = current.clone();
        state.hvac_mode = mode;
        if request.preset_mode.is_some() {
            state.preset_mode = request.preset_mode.clone();
        }
        if request.fan_mode.is_some() {
            state.fan_mode = request.fan_mode.clone();
        }
        if request.swing_mode.is_some() {
            state.swing_mode = request.swing_mode.clone();
        }
        state.target_temperature = target;
        return resolve_off(profile, current, state);
    }

    let mut codes = Vec::new();
    let root = profile.commands();

    // An explicit "on" code is a prefix segment; its absence is not a
    // failure since many devices fold power-on into the mode command.
    if let Some(CommandNode::Code(on_code)) = root.get("on") {
        let identical_toggle = matches!(root.get("off"), Some(CommandNode::Code(off_code)) if off_code == on_code);
        if identical_toggle && current.power == PowerState::On {
            debug!("'on' and 'off' codes are identical and device is already on, skipping 'on'");
        } else {
            debug!("found 'on' power command");
            codes.push(on_code.clone());
        }
    }

    let mut node = root.get(mode.as_str()).ok_or_else(|| ResolveError::MissingCommand {
        dimension: Dimension::Mode,
        value: mode.to_string(),
    })?;
    debug!(mode = %mode, "found operation mode level");

    let mut preset = current.preset_mode.clone();
    if let Some(declared) = profile.preset_modes() {
        let requested = request.preset_mode.as_deref().or(preset.as_deref()).unwrap_or(&declared[0]);
        let (matched, child) = resolve_choice(node, requested, declared).ok_or_else(|| {
            ResolveError::MissingCommand {
                dimension: Dimension::Preset,
                value: requested.to_string(),
            }
        })?;
        debug!(preset = matched, "found preset mode level");
        if matched != WILDCARD {
            preset = Some(matched.to_string());
        }
        node = child;
    }

    let mut fan = current.fan_mode.clone();
    if let Some(declared) = profile.fan_modes() {
        let requested = request.fan_mode.as_deref().or(fan.as_deref()).unwrap_or(&declared[0]);
        let (matched, child) = resolve_choice(node, requested, declared).ok_or_else(|| {
            ResolveError::MissingCommand {
                dimension: Dimension::Fan,
                value: requested.to_string(),
            }
        })?;
        debug!(fan = matched, "found fan mode level");
        if matched != WILDCARD {
            fan = Some(matched.to_string());
        }
        node = child;
    }

    let mut swing = current.swing_mode.clone();
    if let Some(declared) = profile.swing_modes() {
        let requested = request.swing_mode.as_deref().or(swing.as_deref()).unwrap_or(&declared[0]);
        let (matched, child) = resolve_choice(node, requested, declared).ok_or_else(|| {
            ResolveError::MissingCommand {
                dimension: Dimension::Swing,
                value: requested.to_string(),
            }
        })?;
        debug!(swing = matched, "found swing mode level");
        if matched != WILDCARD {
            swing = Some(matched.to_string());
        }
        node = child;
    }

    // Temperature is resolved last: the earlier dimensions have narrowed
    // the subtree this search operates over.
    let missing_temperature = |value: f64| ResolveError::MissingCommand {
        dimension: Dimension::Temperature,
        value: value.to_string(),
    };
    let branch = node.as_branch().ok_or_else(|| missing_temperature(target))?;
    let native_target = convert(target, host_unit, profile.temperature_unit(), None)?;
    debug!(
        host = %target,
        native = %native_target,
        "converted target temperature to device unit"
    );

    let (leaf, resolved_target) = if let Some(child) = branch.get(WILDCARD) {
        // Wildcard: the code is temperature-independent, keep the prior
        // target for the reported state.
        (child, current.target_temperature)
    } else {
        let (native, child) =
            closest_temperature(branch, native_target).ok_or_else(|| missing_temperature(native_target))?;
        let back = convert(
            native,
            profile.temperature_unit(),
            host_unit,
            Some(profile.host_step(host_unit)),
        )?;
        debug!(native = %native, host = %back, "closest temperature match");
        (child, back)
    };

    let code = leaf.as_code().ok_or_else(|| missing_temperature(native_target))?;
    codes.push(code.to_string());

    let mut state = current.clone();
    state.power = PowerState::On;
    state.hvac_mode = mode;
    state.preset_mode = preset;
    state.fan_mode = fan;
    state.swing_mode = swing;
    state.target_temperature = resolved_target;
    Ok(Resolution { codes, state })
}

fn validate_choice(
    requested: Option<&str>,
    declared: Option<&[String]>,
    unsupported: impl FnOnce(String) -> ResolveError,
) -> Result<(), ResolveError> {
    // A request for a capability the device lacks is skipped silently;
    // only a value outside a declared list is an error.
    if let (Some(value), Some(modes)) = (requested, declared)
        && !modes.iter().any(|m| m == value)
    {
        return Err(unsupported(value.to_string()));
    }
    Ok(())
}

fn resolve_off(
    profile: &DeviceProfile,
    current: &ClimateState,
    mut state: ClimateState,
) -> Result<Resolution, ResolveError> {
    let root = profile.commands();
    let mut codes = Vec::new();

    let off_mode_key = format!("off_{}", state.hvac_mode);
    if let Some(CommandNode::Code(code)) = root.get(&off_mode_key) {
        debug!(key = %off_mode_key, "found mode-specific off command");
        codes.push(code.clone());
    } else if let Some(CommandNode::Code(off_code)) = root.get("off") {
        let identical_toggle = matches!(root.get("on"), Some(CommandNode::Code(on_code)) if on_code == off_code);
        if identical_toggle && current.power == PowerState::Off {
            debug!("'on' and 'off' codes are identical and device is already off, skipping 'off'");
        } else {
            debug!("found 'off' power command");
            codes.push(off_code.clone());
        }
    } else {
        return Err(ResolveError::MissingCommand {
            dimension: Dimension::Power,
            value: "off".to_string(),
        });
    }

    state.power = PowerState::Off;
    Ok(Resolution { codes, state })
}

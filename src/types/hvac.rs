// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hvac modes, power state and the derived hvac action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Power state of a climate device.
///
/// # Examples
///
/// ```
/// use irclimate_lib::PowerState;
///
/// assert_eq!(PowerState::On.as_str(), "on");
/// assert_eq!("off".parse::<PowerState>().unwrap(), PowerState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" | "false" => Ok(Self::Off),
            "on" | "1" | "true" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// Hvac operation mode.
///
/// The string labels match the host runtime's climate vocabulary and are
/// the keys used in device command tables.
///
/// # Examples
///
/// ```
/// use irclimate_lib::HvacMode;
///
/// assert_eq!(HvacMode::FanOnly.as_str(), "fan_only");
/// assert_eq!("heat_cool".parse::<HvacMode>().unwrap(), HvacMode::HeatCool);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Device-managed automatic mode.
    Auto,
    /// Cooling.
    Cool,
    /// Dehumidification.
    Dry,
    /// Fan only, no heating or cooling.
    FanOnly,
    /// Heating.
    Heat,
    /// Heat or cool to keep a target.
    HeatCool,
    /// Device is off.
    Off,
}

impl HvacMode {
    /// Returns the snake_case label used in profiles and command tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Dry => "dry",
            Self::FanOnly => "fan_only",
            Self::Heat => "heat",
            Self::HeatCool => "heat_cool",
            Self::Off => "off",
        }
    }

    /// Returns `true` for modes that may actively heat.
    #[must_use]
    pub const fn can_heat(&self) -> bool {
        matches!(self, Self::Heat | Self::HeatCool | Self::Auto)
    }

    /// Returns `true` for modes that may actively cool.
    #[must_use]
    pub const fn can_cool(&self) -> bool {
        matches!(self, Self::Cool | Self::HeatCool | Self::Auto)
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "cool" => Ok(Self::Cool),
            "dry" => Ok(Self::Dry),
            "fan_only" => Ok(Self::FanOnly),
            "heat" => Ok(Self::Heat),
            "heat_cool" => Ok(Self::HeatCool),
            "off" => Ok(Self::Off),
            _ => Err(ValueError::InvalidHvacMode(s.to_string())),
        }
    }
}

/// Observed activity of a climate device, derived from its state.
///
/// This is a pure projection of state plus the live temperature reading;
/// see [`ClimateState::hvac_action`](crate::state::ClimateState::hvac_action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    /// Actively cooling.
    Cooling,
    /// Actively dehumidifying.
    Drying,
    /// Circulating air only.
    Fan,
    /// Actively heating.
    Heating,
    /// On, but not actively conditioning.
    Idle,
    /// Off.
    Off,
}

impl HvacAction {
    /// Returns the snake_case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cooling => "cooling",
            Self::Drying => "drying",
            Self::Fan => "fan",
            Self::Heating => "heating",
            Self::Idle => "idle",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for HvacAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

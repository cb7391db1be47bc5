// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `IRClimate` Lib - A Rust library to control IR/RF air conditioners.
//!
//! Infrared-controlled climate devices cannot report their state; all a hub
//! can do is replay pre-recorded codes. This library loads a JSON profile
//! describing one device (supported modes, temperature range and the raw
//! code for every combination of settings) and resolves requested state
//! changes into the exact codes to transmit through a pluggable
//! [`Controller`].
//!
//! # Supported Features
//!
//! - **Profile loading**: validated device capability and code tables
//! - **Command resolution**: wildcard and fallback key search, closest-match
//!   temperature lookup, idempotent on/off deduplication
//! - **Unit handling**: Celsius/Fahrenheit/Kelvin conversion with step-aware
//!   rounding between device-native and host units
//! - **Orchestration**: per-device serialized transmission with configurable
//!   inter-code delays and commit-after-send state tracking
//!
//! # Quick Start
//!
//! ```
//! use irclimate_lib::{
//!     ClimateState, DeviceProfile, HvacMode, PowerState, ResolveRequest, TemperatureUnit,
//!     resolver::resolve,
//! };
//!
//! # fn main() -> irclimate_lib::Result<()> {
//! let profile = DeviceProfile::from_json(
//!     r#"{
//!         "temperatureUnit": "C",
//!         "precision": 1,
//!         "minTemperature": 16,
//!         "maxTemperature": 30,
//!         "operationModes": ["cool", "heat"],
//!         "commands": {
//!             "off": "CODE_OFF",
//!             "on": "CODE_ON",
//!             "cool": {"20": "CODE_COOL_20", "22": "CODE_COOL_22"}
//!         }
//!     }"#,
//! )?;
//!
//! let current = ClimateState::initial(&profile, TemperatureUnit::Celsius)?;
//! let request = ResolveRequest::new()
//!     .with_hvac_mode(HvacMode::Cool)
//!     .with_target_temperature(21.0);
//!
//! let resolution = resolve(&profile, &current, &request, TemperatureUnit::Celsius)?;
//! assert_eq!(resolution.codes, ["CODE_ON", "CODE_COOL_20"]);
//! assert_eq!(resolution.state.target_temperature, 20.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Driving a Device
//!
//! [`ClimateDevice`] owns the profile, the committed state and a controller,
//! and serializes all transmissions for the device:
//!
//! ```no_run
//! use irclimate_lib::{ClimateDevice, DeviceProfile, HvacMode, LogController, TemperatureUnit};
//!
//! #[tokio::main]
//! async fn main() -> irclimate_lib::Result<()> {
//!     let json = std::fs::read_to_string("profiles/1080.json").unwrap();
//!     let profile = DeviceProfile::from_json(&json)?;
//!     let device = ClimateDevice::new(profile, LogController, TemperatureUnit::Celsius)?;
//!
//!     device.set_hvac_mode(HvacMode::Cool).await?;
//!     device.set_temperature(21.0).await?;
//!     Ok(())
//! }
//! ```

mod device;
pub mod controller;
pub mod error;
pub mod profile;
pub mod resolver;
pub mod state;
pub mod temperature;
pub mod types;

pub use controller::{Controller, LogController};
pub use device::{ClimateDevice, DEFAULT_DELAY};
pub use error::{
    ControllerError, Dimension, Error, ProfileError, ResolveError, Result, ValueError,
};
pub use profile::{CommandNode, DeviceProfile, WILDCARD};
pub use resolver::{Resolution, ResolveRequest};
pub use state::ClimateState;
pub use types::{HvacAction, HvacMode, PowerState, Precision, TemperatureUnit};

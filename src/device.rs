// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device orchestration: resolution, transmission and state commit.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::controller::Controller;
use crate::error::{Error, Result};
use crate::profile::DeviceProfile;
use crate::resolver::{Resolution, ResolveRequest, resolve};
use crate::state::ClimateState;
use crate::types::{HvacAction, HvacMode, PowerState, TemperatureUnit};

/// Default pause after each transmitted code.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// One configured climate device: its profile, committed state and the
/// controller that transmits codes to it.
///
/// Every state change goes through [`apply`](Self::apply), which holds the
/// device's execution lock for the whole multi-code transmission sequence.
/// Concurrent requests for the same device queue in arrival order; devices
/// are independent of each other and the shared [`DeviceProfile`] is
/// read-only.
///
/// # Examples
///
/// ```no_run
/// use irclimate_lib::{ClimateDevice, DeviceProfile, HvacMode, LogController, TemperatureUnit};
///
/// # async fn example() -> irclimate_lib::Result<()> {
/// let json = std::fs::read_to_string("profiles/1080.json").unwrap();
/// let profile = DeviceProfile::from_json(&json)?;
/// let device = ClimateDevice::new(profile, LogController, TemperatureUnit::Celsius)?;
///
/// device.set_hvac_mode(HvacMode::Cool).await?;
/// device.set_temperature(21.0).await?;
/// device.turn_off().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClimateDevice<C> {
    profile: Arc<DeviceProfile>,
    controller: C,
    host_unit: TemperatureUnit,
    delay: Duration,
    state: Mutex<ClimateState>,
}

impl<C: Controller> ClimateDevice<C> {
    /// Creates a device with the initial state derived from the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile's temperature bounds cannot be
    /// expressed in the host unit.
    pub fn new(
        profile: impl Into<Arc<DeviceProfile>>,
        controller: C,
        host_unit: TemperatureUnit,
    ) -> Result<Self> {
        let profile = profile.into();
        let state = ClimateState::initial(&profile, host_unit)?;
        Ok(Self {
            profile,
            controller,
            host_unit,
            delay: DEFAULT_DELAY,
            state: Mutex::new(state),
        })
    }

    /// Sets the pause honored after each transmitted code.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Restores fields from a persisted state, dropping values the profile
    /// no longer declares.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile bounds cannot be expressed in the
    /// host unit.
    pub async fn restore_state(&self, saved: &ClimateState) -> Result<()> {
        let mut state = self.state.lock().await;
        state.restore(saved, &self.profile, self.host_unit)?;
        Ok(())
    }

    /// Returns the device profile.
    #[must_use]
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Returns the host temperature unit this device reports in.
    #[must_use]
    pub fn host_unit(&self) -> TemperatureUnit {
        self.host_unit
    }

    /// Returns the configured inter-code delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns a snapshot of the committed state.
    pub async fn state(&self) -> ClimateState {
        self.state.lock().await.clone()
    }

    /// Returns the observed hvac action derived from the committed state.
    pub async fn hvac_action(&self) -> Option<HvacAction> {
        self.state.lock().await.hvac_action(&self.profile)
    }

    /// Resolves and transmits a requested state change.
    ///
    /// The device's execution lock is held for the entire sequence: resolve,
    /// transmit each code followed by the configured delay, then commit the
    /// normalized state. A resolution failure transmits nothing and changes
    /// nothing. A transmission failure aborts the remaining segments and
    /// leaves the committed state untouched; codes already sent are not
    /// undone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolve`] when no code matches the request and
    /// [`Error::Controller`] when the transport fails.
    pub async fn apply(&self, request: ResolveRequest) -> Result<Resolution> {
        let mut state = self.state.lock().await;
        let resolution = resolve(&self.profile, &state, &request, self.host_unit)?;

        for code in &resolution.codes {
            if let Err(err) = self.controller.send(code).await {
                warn!(error = %err, "transmission failed, aborting sequence");
                return Err(Error::Controller(err));
            }
            tokio::time::sleep(self.delay).await;
        }

        debug!(codes = resolution.codes.len(), "sequence complete, committing state");
        *state = resolution.state.clone();
        Ok(resolution)
    }

    /// Switches to an operation mode, powering the device on.
    ///
    /// Requesting [`HvacMode::Off`] turns the device off while remembering
    /// the current mode.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_hvac_mode(mode)).await
    }

    /// Sets the target temperature in the host unit.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_temperature(&self, temperature: f64) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_target_temperature(temperature))
            .await
    }

    /// Sets the preset mode.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_preset_mode(&self, preset: impl Into<String>) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_preset_mode(preset)).await
    }

    /// Sets the fan mode.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_fan_mode(&self, fan: impl Into<String>) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_fan_mode(fan)).await
    }

    /// Sets the swing mode.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_swing_mode(&self, swing: impl Into<String>) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_swing_mode(swing)).await
    }

    /// Powers the device on, resuming the last operation mode.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn turn_on(&self) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_power(PowerState::On)).await
    }

    /// Powers the device off.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn turn_off(&self) -> Result<Resolution> {
        self.apply(ResolveRequest::new().with_power(PowerState::Off)).await
    }

    /// Feeds a new ambient temperature reading, host unit.
    pub async fn update_current_temperature(&self, temperature: f64) {
        self.state.lock().await.current_temperature = Some(temperature);
    }

    /// Feeds a new ambient humidity reading, percent.
    pub async fn update_current_humidity(&self, humidity: f64) {
        self.state.lock().await.current_humidity = Some(humidity);
    }
}

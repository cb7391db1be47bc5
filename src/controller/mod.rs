// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The controller seam.
//!
//! A controller is the transport that actually transmits a resolved code to
//! the device: a broadlink hub, an MQTT topic, an ESPHome service call. This
//! crate only defines the capability; transports live with the integration
//! that owns the hardware.

use std::future::Future;

use tracing::info;

use crate::error::ControllerError;

/// A sink that transmits raw code blobs to a device.
///
/// Implementations are free to interpret the code string however their
/// transport requires (Base64 IR blob, Pronto hex, vendor packet). A `send`
/// may fail; the caller aborts the remaining segments of a multi-code
/// sequence on the first failure.
///
/// # Examples
///
/// ```
/// use irclimate_lib::{Controller, ControllerError};
///
/// struct Recorder(std::sync::Mutex<Vec<String>>);
///
/// impl Controller for Recorder {
///     async fn send(&self, code: &str) -> Result<(), ControllerError> {
///         self.0.lock().unwrap().push(code.to_string());
///         Ok(())
///     }
/// }
/// ```
pub trait Controller {
    /// Transmits one code to the device.
    ///
    /// # Errors
    ///
    /// Returns a [`ControllerError`] when the transport fails to deliver
    /// the code.
    fn send(&self, code: &str) -> impl Future<Output = Result<(), ControllerError>> + Send;
}

/// A controller that logs codes instead of transmitting them.
///
/// Useful for dry runs and for wiring up a device before its transport is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogController;

impl Controller for LogController {
    async fn send(&self, code: &str) -> Result<(), ControllerError> {
        info!(code, "dry-run transmit");
        Ok(())
    }
}

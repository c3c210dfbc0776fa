// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Particle Cloud access.
//!
//! Devices are reached through the Particle Cloud REST API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | List devices | `GET /v1/devices?access_token=…` |
//! | Read variable | `GET /v1/devices/{id}/{name}?access_token=…` |
//! | Call function | `POST /v1/devices/{id}/{name}` with form `access_token`, `arg` |
//!
//! [`CloudApi`] abstracts these calls so the Connected Home adapter can run
//! against [`CloudClient`] (feature `http`) or any other implementation.

mod config;
#[cfg(feature = "http")]
mod client;

pub use config::CloudConfig;
#[cfg(feature = "http")]
pub use client::CloudClient;

use serde::Deserialize;

use crate::command::Command;
use crate::error::Error;
use crate::state::VariableValue;

/// A device registered to a cloud account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloudDevice {
    /// Cloud device identifier.
    pub id: String,
    /// User-assigned device name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the device is currently online.
    #[serde(default)]
    pub connected: bool,
}

/// Response to a variable read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableResponse {
    /// Response kind, `"VarReturn"` for a successful read.
    #[serde(default)]
    pub cmd: Option<String>,
    /// Variable name.
    #[serde(default)]
    pub name: Option<String>,
    /// Variable value.
    pub result: VariableValue,
}

impl VariableResponse {
    /// Returns `true` if the cloud reported a successful read.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.cmd.is_some()
    }
}

/// Response to a function call.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct FunctionResponse {
    #[serde(default)]
    pub return_value: Option<i32>,
}

/// Operations the cloud offers on an account's devices.
#[allow(async_fn_in_trait)]
pub trait CloudApi {
    /// Lists all devices of the account owning `access_token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    async fn list_devices(&self, access_token: &str) -> Result<Vec<CloudDevice>, Error>;

    /// Reads a published variable of a device.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    async fn get_variable(
        &self,
        access_token: &str,
        device_id: &str,
        name: &str,
    ) -> Result<VariableResponse, Error>;

    /// Calls a registered function and returns its integer result.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// `return_value`.
    async fn call_function<C: Command + Sync>(
        &self,
        access_token: &str,
        device_id: &str,
        command: &C,
    ) -> Result<i32, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_device_list() {
        let json = r#"[
            {"id": "abc123", "name": "lamp", "connected": true, "platform_id": 6},
            {"id": "def456", "connected": false}
        ]"#;
        let devices: Vec<CloudDevice> = serde_json::from_str(json).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name.as_deref(), Some("lamp"));
        assert!(devices[0].connected);
        assert!(devices[1].name.is_none());
        assert!(!devices[1].connected);
    }

    #[test]
    fn parse_variable_response() {
        let json = r#"{"cmd":"VarReturn","name":"deviceState","result":1,"coreInfo":{"connected":true}}"#;
        let response: VariableResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_value());
        assert_eq!(response.result.as_int(), Some(1));
    }

    #[test]
    fn parse_function_response() {
        let json = r#"{"id":"abc123","name":"lamp","connected":true,"return_value":-2}"#;
        let response: FunctionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.return_value, Some(-2));

        let response: FunctionResponse = serde_json::from_str(r#"{"ok":false}"#).unwrap();
        assert_eq!(response.return_value, None);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connected Home message envelope and payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload version spoken by this adapter.
pub const PAYLOAD_VERSION: &str = "1";

/// Message namespaces.
pub mod namespace {
    /// Appliance discovery.
    pub const DISCOVERY: &str = "Discovery";
    /// Appliance control.
    pub const CONTROL: &str = "Control";
}

/// Message names.
pub mod name {
    /// Discovery response.
    pub const DISCOVER_APPLIANCES_RESPONSE: &str = "DiscoverAppliancesResponse";
    /// On/off request.
    pub const SWITCH_ON_OFF_REQUEST: &str = "SwitchOnOffRequest";
    /// On/off response.
    pub const SWITCH_ON_OFF_RESPONSE: &str = "SwitchOnOffResponse";
}

/// Header shared by every request and response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Message namespace, e.g. `Discovery`.
    pub namespace: String,
    /// Message name, e.g. `SwitchOnOffRequest`.
    pub name: String,
    /// Payload version.
    #[serde(default = "default_payload_version")]
    pub payload_version: String,
    /// Request identifier, when the caller supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

fn default_payload_version() -> String {
    PAYLOAD_VERSION.to_string()
}

impl Header {
    /// Creates a header with the current payload version.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            payload_version: default_payload_version(),
            message_id: None,
        }
    }
}

/// A request or response: header plus free-form payload.
///
/// # Examples
///
/// ```
/// use particle_home::connected_home::Message;
///
/// let json = r#"{"header":{"namespace":"Discovery","name":"DiscoverAppliancesRequest","payloadVersion":"1"},
///                "payload":{"accessToken":"abc"}}"#;
/// let message: Message = serde_json::from_str(json).unwrap();
/// assert_eq!(message.header.namespace, "Discovery");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message header.
    pub header: Header,
    /// Message payload.
    #[serde(default)]
    pub payload: Value,
}

impl Message {
    /// Creates a message.
    #[must_use]
    pub fn new(header: Header, payload: Value) -> Self {
        Self { header, payload }
    }
}

/// Payload of a discovery request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscoveryPayload {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Appliance reference inside a control request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplianceRef {
    #[serde(default)]
    pub appliance_id: Option<String>,
}

/// Payload of a control request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ControlPayload {
    #[serde(default)]
    pub access_token: Option<Value>,
    #[serde(default)]
    pub appliance: Option<ApplianceRef>,
    #[serde(default)]
    pub switch_control_action: Option<String>,
}

/// Error codes reported back in a control error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlErrorCode {
    /// The request name is not supported.
    UnsupportedOperation,
    /// The request payload is invalid, or the device rejected the command.
    UnexpectedInformationReceived,
    /// The cloud could not be reached.
    DependentServiceUnavailable,
}

impl ControlErrorCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            Self::UnexpectedInformationReceived => "UNEXPECTED_INFORMATION_RECEIVED",
            Self::DependentServiceUnavailable => "DEPENDENT_SERVICE_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ControlErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

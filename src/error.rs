// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `particle_home` library.
//!
//! Rejected control commands are not errors: they are reported as a
//! [`ControlStatus`](crate::command::ControlStatus) so the numeric code can be
//! returned to the cloud caller unchanged. The types below cover everything
//! else: value validation, cloud communication, JSON parsing and calls to
//! functions or variables the device never registered.

use thiserror::Error;

use crate::command::MalformedCommand;
use crate::connected_home::ControlErrorCode;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the cloud.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response or descriptor.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during a device operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// A command string could not be decoded.
    #[error("malformed command: {0}")]
    Command(#[from] MalformedCommand),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i32,
        /// Maximum allowed value.
        max: i32,
        /// The actual value that was provided.
        actual: i32,
    },

    /// An appliance identifier is not of the form `<deviceId>-<sub>`.
    #[error("invalid appliance id: {0}")]
    InvalidApplianceId(String),
}

/// Errors related to Particle Cloud communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The cloud answered with an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The access token was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// A function call response did not carry a `return_value`.
    #[error("bad return value: {0}")]
    MissingReturnValue(String),
}

/// Errors related to parsing cloud responses and descriptors.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Unexpected payload shape.
    #[error("unexpected format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to the device's registered surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// No function with this name is registered.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// No variable with this name is published.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
}

/// Errors returned by the Connected Home adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The request namespace is neither `Discovery` nor `Control`.
    #[error("unsupported namespace: {0}")]
    UnsupportedNamespace(String),

    /// Discovery could not list the account's devices.
    #[error("discovery failed: {0}")]
    Discovery(#[source] Error),

    /// A control request failed; the error is reported to the assistant.
    #[error("control failed: {0}")]
    Control(ControlError),
}

/// Control failure reported back to the voice assistant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct ControlError {
    /// Name of the request that failed.
    pub name: String,
    /// Error code.
    pub code: ControlErrorCode,
    /// Human readable description.
    pub description: String,
}

impl ControlError {
    /// Creates a control error.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: ControlErrorCode,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code,
            description: description.into(),
        }
    }
}

impl From<ControlError> for AdapterError {
    fn from(err: ControlError) -> Self {
        Self::Control(err)
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 1,
            actual: 5,
        };
        assert_eq!(err.to_string(), "value 5 is out of range [0, 1]");
    }

    #[test]
    fn error_from_device_error() {
        let err: Error = DeviceError::UnknownFunction("blink".to_string()).into();
        assert!(matches!(
            err,
            Error::Device(DeviceError::UnknownFunction(ref name)) if name == "blink"
        ));
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::MissingReturnValue("{}".to_string());
        assert_eq!(err.to_string(), "bad return value: {}");
        assert_eq!(
            ProtocolError::Timeout(2000).to_string(),
            "request timed out after 2000 ms"
        );
    }

    #[test]
    fn control_error_display() {
        let err = ControlError::new(
            "SwitchOnOffRequest",
            ControlErrorCode::UnsupportedOperation,
            "Unrecognized operation",
        );
        assert_eq!(
            err.to_string(),
            "UNSUPPORTED_OPERATION: Unrecognized operation"
        );
        let err: AdapterError = err.into();
        assert!(matches!(err, AdapterError::Control(_)));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("result".to_string());
        assert_eq!(err.to_string(), "missing field: result");
    }
}

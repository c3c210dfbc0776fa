// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request handling for the Connected Home skill.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use tokio::time::Instant;

use crate::cloud::{CloudApi, CloudDevice};
use crate::command::ControlStatus;
use crate::connected_home::appliance::{
    ApplianceId, DiscoveredAppliance, SwitchAction, appliances_from_descriptor,
};
use crate::connected_home::message::{
    ControlErrorCode, ControlPayload, DiscoveryPayload, Header, Message, name, namespace,
};
use crate::descriptor::DeviceDescriptor;
use crate::error::{AdapterError, ControlError, Error, ParseError, ProtocolError};
use crate::state::PublishedVariables;

/// Adapter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    deadline: Duration,
    descriptor_variable: String,
}

impl AdapterConfig {
    /// Default time budget for one request, cloud calls included.
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(8);

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deadline: Self::DEFAULT_DEADLINE,
            descriptor_variable: PublishedVariables::DESCRIPTOR.to_string(),
        }
    }

    /// Sets the time budget for one request.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the variable holding each device's descriptor.
    #[must_use]
    pub fn with_descriptor_variable(mut self, name: impl Into<String>) -> Self {
        self.descriptor_variable = name.into();
        self
    }

    /// Returns the deadline.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Returns the descriptor variable name.
    #[must_use]
    pub fn descriptor_variable(&self) -> &str {
        &self.descriptor_variable
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Bridges Connected Home requests to devices behind a [`CloudApi`].
///
/// # Examples
///
/// ```no_run
/// use particle_home::cloud::{CloudClient, CloudConfig};
/// use particle_home::connected_home::{ConnectedHomeAdapter, Message};
///
/// # async fn example(request: Message) -> Result<(), Box<dyn std::error::Error>> {
/// let adapter = ConnectedHomeAdapter::new(CloudClient::new(CloudConfig::default())?);
/// let response = match adapter.handle(request).await {
///     Ok(response) => response,
///     Err(err) => err.to_message().ok_or(err)?,
/// };
/// println!("{}", serde_json::to_string(&response)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConnectedHomeAdapter<C: CloudApi> {
    cloud: C,
    config: AdapterConfig,
}

impl<C: CloudApi> ConnectedHomeAdapter<C> {
    /// Creates an adapter with the default configuration.
    pub fn new(cloud: C) -> Self {
        Self::with_config(cloud, AdapterConfig::new())
    }

    /// Creates an adapter with a custom configuration.
    pub fn with_config(cloud: C, config: AdapterConfig) -> Self {
        Self { cloud, config }
    }

    /// Returns the cloud backend.
    pub fn cloud(&self) -> &C {
        &self.cloud
    }

    /// Handles one request and returns the response to send back.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Control`] for control failures that must be
    /// reported to the assistant (see [`AdapterError::to_message`]),
    /// [`AdapterError::Discovery`] if the device list cannot be fetched, and
    /// [`AdapterError::UnsupportedNamespace`] for unknown namespaces.
    pub async fn handle(&self, request: Message) -> Result<Message, AdapterError> {
        tracing::debug!(
            namespace = %request.header.namespace,
            name = %request.header.name,
            "Handling Connected Home request"
        );

        match request.header.namespace.as_str() {
            namespace::DISCOVERY => self.handle_discovery(request).await,
            namespace::CONTROL => self.handle_control(request).await,
            other => {
                tracing::warn!(namespace = other, "Unsupported namespace");
                Err(AdapterError::UnsupportedNamespace(other.to_string()))
            }
        }
    }

    async fn handle_discovery(&self, request: Message) -> Result<Message, AdapterError> {
        let payload: DiscoveryPayload = serde_json::from_value(request.payload)
            .map_err(|e| AdapterError::Discovery(ParseError::from(e).into()))?;
        let token = payload
            .access_token
            .ok_or_else(|| {
                AdapterError::Discovery(ParseError::MissingField("accessToken".into()).into())
            })?;

        let appliances = self
            .discover_appliances(token.trim())
            .await
            .map_err(AdapterError::Discovery)?;

        Ok(Message::new(
            Header::new(namespace::DISCOVERY, name::DISCOVER_APPLIANCES_RESPONSE),
            json!({ "discoveredAppliances": appliances }),
        ))
    }

    /// Lists every appliance exposed by the account's connected devices.
    ///
    /// Offline devices are not queried. Descriptors of the connected devices
    /// are read concurrently, and the listing plus every read share the
    /// configured deadline. A device whose descriptor cannot be read, parsed,
    /// or fetched in time is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the device list itself cannot be fetched.
    pub async fn discover_appliances(
        &self,
        access_token: &str,
    ) -> Result<Vec<DiscoveredAppliance>, Error> {
        let deadline = self.request_deadline();
        let devices = self
            .until(deadline, self.cloud.list_devices(access_token))
            .await?;

        let connected: Vec<&CloudDevice> = devices.iter().filter(|d| d.connected).collect();
        let reads = connected
            .iter()
            .map(|&device| self.until(deadline, self.read_descriptor(access_token, device)));
        let descriptors = join_all(reads).await;

        let mut appliances = Vec::new();
        for (device, descriptor) in connected.into_iter().zip(descriptors) {
            match descriptor {
                Ok(Some(descriptor)) => {
                    let found = appliances_from_descriptor(&device.id, &descriptor);
                    tracing::debug!(device = %device.id, count = found.len(), "Found appliances");
                    appliances.extend(found);
                }
                Ok(None) => {
                    tracing::debug!(device = %device.id, "Device publishes no descriptor");
                }
                Err(err) => {
                    tracing::warn!(device = %device.id, error = %err, "Skipping device");
                }
            }
        }

        tracing::info!(
            devices = devices.len(),
            appliances = appliances.len(),
            "Discovery complete"
        );
        Ok(appliances)
    }

    async fn read_descriptor(
        &self,
        access_token: &str,
        device: &CloudDevice,
    ) -> Result<Option<DeviceDescriptor>, Error> {
        let response = self
            .cloud
            .get_variable(access_token, &device.id, &self.config.descriptor_variable)
            .await?;

        if !response.is_value() {
            return Ok(None);
        }
        let Some(text) = response.result.as_text() else {
            return Err(ParseError::UnexpectedFormat(format!(
                "{} is not a text variable",
                self.config.descriptor_variable
            ))
            .into());
        };
        Ok(Some(DeviceDescriptor::from_json(text)?))
    }

    async fn handle_control(&self, request: Message) -> Result<Message, AdapterError> {
        let request_name = request.header.name;
        if request_name != name::SWITCH_ON_OFF_REQUEST {
            tracing::warn!(name = %request_name, "Unsupported control request");
            return Err(ControlError::new(
                request_name,
                ControlErrorCode::UnsupportedOperation,
                "Unrecognized operation",
            )
            .into());
        }

        let invalid = || {
            ControlError::new(
                name::SWITCH_ON_OFF_REQUEST,
                ControlErrorCode::UnexpectedInformationReceived,
                "Input is invalid",
            )
        };

        let payload: ControlPayload =
            serde_json::from_value(request.payload).map_err(|_| invalid())?;
        let Some(token) = payload.access_token.as_ref().and_then(|t| t.as_str()) else {
            tracing::warn!("Control request without access token");
            return Err(invalid().into());
        };
        let appliance_id: ApplianceId = payload
            .appliance
            .and_then(|a| a.appliance_id)
            .ok_or_else(invalid)?
            .parse()
            .map_err(|err| {
                tracing::warn!(error = %err, "Control request with bad appliance id");
                invalid()
            })?;

        let action = SwitchAction::from_wire(payload.switch_control_action.as_deref());
        let command = appliance_id.command(action);
        tracing::debug!(appliance = %appliance_id, ?action, "Switching appliance");

        let deadline = self.request_deadline();
        let code = self
            .until(
                deadline,
                self.cloud
                    .call_function(token.trim(), appliance_id.device_id(), &command),
            )
            .await
            .map_err(|err| {
                tracing::warn!(appliance = %appliance_id, error = %err, "Control call failed");
                ControlError::new(
                    name::SWITCH_ON_OFF_REQUEST,
                    ControlErrorCode::DependentServiceUnavailable,
                    "Unable to connect to server",
                )
            })?;

        if !ControlStatus::try_from(code).is_ok_and(ControlStatus::is_success) {
            let reason = ControlStatus::try_from(code)
                .map_or_else(|_| format!("unknown status ({code})"), |s| s.to_string());
            tracing::warn!(appliance = %appliance_id, code, "Device rejected command");
            return Err(ControlError::new(
                name::SWITCH_ON_OFF_REQUEST,
                ControlErrorCode::UnexpectedInformationReceived,
                format!("Device rejected command: {reason}"),
            )
            .into());
        }

        Ok(Message::new(
            Header::new(namespace::CONTROL, name::SWITCH_ON_OFF_RESPONSE),
            json!({ "success": true }),
        ))
    }

    fn request_deadline(&self) -> Instant {
        Instant::now() + self.config.deadline
    }

    async fn until<T>(
        &self,
        deadline: Instant,
        operation: impl Future<Output = Result<T, Error>>,
    ) -> Result<T, Error> {
        tokio::time::timeout_at(deadline, operation)
            .await
            .unwrap_or_else(|_| {
                let millis = u64::try_from(self.config.deadline.as_millis()).unwrap_or(u64::MAX);
                Err(ProtocolError::Timeout(millis).into())
            })
    }
}

impl ControlError {
    /// Builds the error response sent back to the assistant.
    #[must_use]
    pub fn to_message(&self) -> Message {
        Message::new(
            Header::new(namespace::CONTROL, self.name.clone()),
            json!({
                "exception": {
                    "code": self.code,
                    "description": self.description,
                }
            }),
        )
    }
}

impl AdapterError {
    /// Returns the error response for failures the assistant should see.
    ///
    /// Only control failures have one; the others fail the invocation.
    #[must_use]
    pub fn to_message(&self) -> Option<Message> {
        match self {
            Self::Control(err) => Some(err.to_message()),
            Self::UnsupportedNamespace(_) | Self::Discovery(_) => None,
        }
    }
}

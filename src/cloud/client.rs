// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Particle Cloud API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::cloud::{CloudApi, CloudConfig, CloudDevice, FunctionResponse, VariableResponse};
use crate::command::Command;
use crate::error::{Error, ParseError, ProtocolError};

/// Particle Cloud REST client.
///
/// Access tokens are passed per call and never logged.
///
/// # Examples
///
/// ```no_run
/// use particle_home::cloud::{CloudApi, CloudClient, CloudConfig};
/// use particle_home::{ControlCommand, NumberParsing};
///
/// # async fn example() -> particle_home::Result<()> {
/// let client = CloudClient::new(CloudConfig::default())?;
/// let command = ControlCommand::parse("0.1", NumberParsing::Lenient)?;
/// let code = client.call_function("token", "abc123", &command).await?;
/// assert_eq!(code, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CloudClient {
    config: CloudConfig,
    client: Client,
}

impl CloudClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host is empty, or an
    /// HTTP error if the client cannot be created.
    pub fn new(config: CloudConfig) -> Result<Self, ProtocolError> {
        if config.host().trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        let client = Client::builder().build().map_err(ProtocolError::Http)?;
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    fn device_path(device_id: &str, name: &str) -> String {
        format!(
            "/devices/{}/{}",
            urlencoding::encode(device_id),
            urlencoding::encode(name)
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
    ) -> Result<T, Error> {
        tracing::debug!(path, "Sending cloud GET");
        let request = self
            .client
            .get(self.config.api_url(path))
            .query(&[("access_token", access_token)])
            .timeout(self.config.read_timeout());
        let body = send(request, self.config.read_timeout()).await?;
        tracing::debug!(path, body = %body, "Received cloud response");
        serde_json::from_str(&body).map_err(|e| ParseError::from(e).into())
    }
}

impl CloudApi for CloudClient {
    async fn list_devices(&self, access_token: &str) -> Result<Vec<CloudDevice>, Error> {
        self.get_json(access_token, "/devices").await
    }

    async fn get_variable(
        &self,
        access_token: &str,
        device_id: &str,
        name: &str,
    ) -> Result<VariableResponse, Error> {
        self.get_json(access_token, &Self::device_path(device_id, name))
            .await
    }

    async fn call_function<C: Command + Sync>(
        &self,
        access_token: &str,
        device_id: &str,
        command: &C,
    ) -> Result<i32, Error> {
        let path = Self::device_path(device_id, &command.name());
        let argument = command.argument();
        tracing::debug!(path = %path, arg = %argument, "Calling cloud function");

        let request = self
            .client
            .post(self.config.api_url(&path))
            .form(&[("access_token", access_token), ("arg", argument.as_str())])
            .timeout(self.config.call_timeout());
        let body = send(request, self.config.call_timeout()).await?;

        let parsed: FunctionResponse =
            serde_json::from_str(&body).map_err(ParseError::from)?;
        let Some(code) = parsed.return_value else {
            tracing::warn!(path = %path, "Function response without return_value");
            return Err(ProtocolError::MissingReturnValue(body).into());
        };
        tracing::debug!(path = %path, code, "Cloud function returned");
        Ok(code)
    }
}

async fn send(request: RequestBuilder, timeout: Duration) -> Result<String, ProtocolError> {
    let response = request
        .send()
        .await
        .map_err(|e| map_request_error(e, timeout))?;
    let response = check_status(response)?;
    response
        .text()
        .await
        .map_err(|e| map_request_error(e, timeout))
}

fn check_status(response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ProtocolError::AuthenticationFailed);
    }
    if !status.is_success() {
        return Err(ProtocolError::ConnectionFailed(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }
    Ok(response)
}

fn map_request_error(err: reqwest::Error, timeout: Duration) -> ProtocolError {
    if err.is_timeout() {
        ProtocolError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
    } else {
        ProtocolError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_path_is_encoded() {
        assert_eq!(
            CloudClient::device_path("abc123", "achStr"),
            "/devices/abc123/achStr"
        );
        assert_eq!(
            CloudClient::device_path("a b", "x/y"),
            "/devices/a%20b/x%2Fy"
        );
    }

    #[test]
    fn empty_host_rejected() {
        assert!(matches!(
            CloudClient::new(CloudConfig::new(" ")),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn client_keeps_config() {
        let client = CloudClient::new(CloudConfig::new("localhost").with_http()).unwrap();
        assert_eq!(client.config().base_url(), "http://localhost");
    }
}

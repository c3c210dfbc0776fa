// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Particle Cloud connection settings.

use std::time::Duration;

/// Configuration for reaching the Particle Cloud API.
///
/// # Examples
///
/// ```
/// use particle_home::cloud::CloudConfig;
/// use std::time::Duration;
///
/// let config = CloudConfig::default();
/// assert_eq!(config.base_url(), "https://api.particle.io");
///
/// let config = CloudConfig::new("127.0.0.1")
///     .with_http()
///     .with_port(8080)
///     .with_call_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfig {
    host: String,
    port: u16,
    use_https: bool,
    api_path: String,
    read_timeout: Duration,
    call_timeout: Duration,
}

impl CloudConfig {
    /// Default cloud host.
    pub const DEFAULT_HOST: &'static str = "api.particle.io";
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default API path prefix.
    pub const DEFAULT_API_PATH: &'static str = "/v1";
    /// Default timeout for device listing and variable reads.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(3);
    /// Default timeout for function calls.
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(2);

    /// Creates an HTTPS configuration for the given host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_HTTPS_PORT,
            use_https: true,
            api_path: Self::DEFAULT_API_PATH.to_string(),
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Switches to plain HTTP.
    ///
    /// If the port is still the HTTPS default it becomes 80.
    #[must_use]
    pub fn with_http(mut self) -> Self {
        self.use_https = false;
        if self.port == Self::DEFAULT_HTTPS_PORT {
            self.port = Self::DEFAULT_PORT;
        }
        self
    }

    /// Sets the API path prefix.
    #[must_use]
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    /// Sets the timeout for listing devices and reading variables.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the timeout for function calls.
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is used.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the read timeout.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the function call timeout.
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Builds the base URL, without the API path.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let default_port = if self.use_https {
            Self::DEFAULT_HTTPS_PORT
        } else {
            Self::DEFAULT_PORT
        };
        if self.port == default_port {
            format!("{scheme}://{}", self.host)
        } else {
            format!("{scheme}://{}:{}", self.host, self.port)
        }
    }

    /// Builds the URL of an API path such as `/devices`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        let prefix = self.api_path.trim_end_matches('/');
        format!("{}{prefix}{path}", self.base_url())
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CloudConfig::default();
        assert_eq!(config.host(), "api.particle.io");
        assert_eq!(config.port(), 443);
        assert!(config.use_https());
        assert_eq!(config.read_timeout(), Duration::from_secs(3));
        assert_eq!(config.call_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn with_http_switches_default_port() {
        let config = CloudConfig::new("localhost").with_http();
        assert!(!config.use_https());
        assert_eq!(config.port(), 80);
        assert_eq!(config.base_url(), "http://localhost");
    }

    #[test]
    fn with_http_keeps_custom_port() {
        let config = CloudConfig::new("localhost").with_port(9000).with_http();
        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn https_custom_port() {
        let config = CloudConfig::new("cloud.example").with_port(8443);
        assert_eq!(config.base_url(), "https://cloud.example:8443");
    }

    #[test]
    fn api_url_joins_path() {
        let config = CloudConfig::default();
        assert_eq!(
            config.api_url("/devices"),
            "https://api.particle.io/v1/devices"
        );
        let config = config.with_api_path("/v2/");
        assert_eq!(
            config.api_url("/devices"),
            "https://api.particle.io/v2/devices"
        );
    }
}

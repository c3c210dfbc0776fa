// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device descriptor published as the `achStr` variable.
//!
//! The descriptor tells the Connected Home adapter what the device is and
//! which outputs it exposes:
//!
//! ```json
//! {"v":"0.1","mfn":"HarrisonJones","mdn":"Prototype",
//!  "devices":[{"n":0,"fn":"Living Room Light","fd":"Floor lamp in the living room"}]}
//! ```
//!
//! Every field is optional on the wire so that discovery can substitute
//! placeholders for descriptors published by other firmware.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Descriptor of a device and its controllable outputs.
///
/// # Examples
///
/// ```
/// use particle_home::DeviceDescriptor;
///
/// let descriptor = DeviceDescriptor::default();
/// let parsed = DeviceDescriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
/// assert_eq!(parsed.devices.len(), 1);
/// assert_eq!(parsed.model.as_deref(), Some("Prototype"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Descriptor format version.
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Manufacturer name.
    #[serde(rename = "mfn", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Model name.
    #[serde(rename = "mdn", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Controllable outputs.
    #[serde(default)]
    pub devices: Vec<DescribedDevice>,
}

/// One controllable output listed in a [`DeviceDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribedDevice {
    /// Device number used in `control` commands.
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,

    /// Name spoken to the voice assistant.
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// Longer description shown in the companion app.
    #[serde(rename = "fd", default, skip_serializing_if = "Option::is_none")]
    pub friendly_description: Option<String>,
}

impl DeviceDescriptor {
    /// Descriptor format version written by this firmware.
    pub const DEFAULT_VERSION: &'static str = "0.1";
    /// Manufacturer written by this firmware.
    pub const DEFAULT_MANUFACTURER: &'static str = "HarrisonJones";
    /// Model written by this firmware.
    pub const DEFAULT_MODEL: &'static str = "Prototype";

    /// Creates a descriptor with no outputs.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            version: Some(version.into()),
            manufacturer: Some(manufacturer.into()),
            model: Some(model.into()),
            devices: Vec::new(),
        }
    }

    /// Adds an output.
    #[must_use]
    pub fn with_device(mut self, device: DescribedDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Serializes to the compact JSON string published by the device.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ParseError> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Parses a published descriptor string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the string is not a descriptor object.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_VERSION,
            Self::DEFAULT_MANUFACTURER,
            Self::DEFAULT_MODEL,
        )
        .with_device(DescribedDevice::new(
            0,
            "Living Room Light",
            "Floor lamp in the living room",
        ))
    }
}

impl DescribedDevice {
    /// Creates a fully populated output entry.
    #[must_use]
    pub fn new(
        number: i32,
        friendly_name: impl Into<String>,
        friendly_description: impl Into<String>,
    ) -> Self {
        Self {
            number: Some(number),
            friendly_name: Some(friendly_name.into()),
            friendly_description: Some(friendly_description.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_descriptor_wire_format() {
        assert_eq!(
            DeviceDescriptor::default().to_json().unwrap(),
            r#"{"v":"0.1","mfn":"HarrisonJones","mdn":"Prototype","devices":[{"n":0,"fn":"Living Room Light","fd":"Floor lamp in the living room"}]}"#
        );
    }

    #[test]
    fn parse_firmware_descriptor() {
        let json = r#"{"v":"0.1","mfn":"HarrisonJones","mdn":"Prototype","devices":[{"n":1,"fn":"Living Room Light","fd":"Floor lamp in the living room"}]}"#;
        let descriptor = DeviceDescriptor::from_json(json).unwrap();
        assert_eq!(descriptor.version.as_deref(), Some("0.1"));
        assert_eq!(descriptor.manufacturer.as_deref(), Some("HarrisonJones"));
        assert_eq!(descriptor.devices[0].number, Some(1));
        assert_eq!(
            descriptor.devices[0].friendly_name.as_deref(),
            Some("Living Room Light")
        );
    }

    #[test]
    fn parse_sparse_descriptor() {
        let descriptor = DeviceDescriptor::from_json(r#"{"devices":[{}]}"#).unwrap();
        assert!(descriptor.manufacturer.is_none());
        assert_eq!(descriptor.devices.len(), 1);
        assert!(descriptor.devices[0].number.is_none());
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(matches!(
            DeviceDescriptor::from_json("[1,2]"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn builder_adds_devices() {
        let descriptor = DeviceDescriptor::new("1.0", "Acme", "Relay2")
            .with_device(DescribedDevice::new(0, "Fan", "Ceiling fan"))
            .with_device(DescribedDevice::new(1, "Pump", "Garden pump"));
        assert_eq!(descriptor.devices.len(), 2);
        assert_eq!(descriptor.devices[1].number, Some(1));
    }
}

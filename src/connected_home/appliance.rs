// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliances as seen by the voice assistant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::ControlCommand;
use crate::descriptor::DeviceDescriptor;
use crate::error::ValueError;
use crate::types::{DeviceLevel, DeviceNumber};

const MISSING_MANUFACTURER: &str = "Missing Manufacturer Name";
const MISSING_MODEL: &str = "Missing Model Name";
const MISSING_VERSION: &str = "Missing Version String";
const MISSING_FRIENDLY_NAME: &str = "Missing Friendly Name";
const MISSING_DESCRIPTION: &str = "Missing Description";

/// One appliance returned by discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAppliance {
    /// `<cloudDeviceId>-<deviceNumber>`.
    pub appliance_id: String,
    /// Manufacturer name.
    pub manufacturer_name: String,
    /// Model name.
    pub model_name: String,
    /// Descriptor version.
    pub version: String,
    /// Spoken name.
    pub friendly_name: String,
    /// Description.
    pub friendly_description: String,
    /// Always `true`: only connected devices are queried.
    pub is_reachable: bool,
    /// Unused, always empty.
    pub additional_appliance_details: Map<String, Value>,
}

/// Expands a device's descriptor into its appliances.
///
/// Missing descriptor fields are replaced by placeholders so one sloppy
/// firmware does not break discovery for the whole account.
///
/// # Examples
///
/// ```
/// use particle_home::DeviceDescriptor;
/// use particle_home::connected_home::appliances_from_descriptor;
///
/// let appliances = appliances_from_descriptor("abc123", &DeviceDescriptor::default());
/// assert_eq!(appliances[0].appliance_id, "abc123-0");
/// assert_eq!(appliances[0].friendly_name, "Living Room Light");
/// ```
#[must_use]
pub fn appliances_from_descriptor(
    device_id: &str,
    descriptor: &DeviceDescriptor,
) -> Vec<DiscoveredAppliance> {
    descriptor
        .devices
        .iter()
        .enumerate()
        .map(|(i, device)| {
            let suffix = device
                .number
                .map_or_else(|| format!("MISSING-{i}"), |n| n.to_string());
            DiscoveredAppliance {
                appliance_id: format!("{device_id}-{suffix}"),
                manufacturer_name: or_missing(
                    descriptor.manufacturer.as_deref(),
                    MISSING_MANUFACTURER,
                ),
                model_name: or_missing(descriptor.model.as_deref(), MISSING_MODEL),
                version: or_missing(descriptor.version.as_deref(), MISSING_VERSION),
                friendly_name: or_missing(
                    device.friendly_name.as_deref(),
                    MISSING_FRIENDLY_NAME,
                ),
                friendly_description: or_missing(
                    device.friendly_description.as_deref(),
                    MISSING_DESCRIPTION,
                ),
                is_reachable: true,
                additional_appliance_details: Map::new(),
            }
        })
        .collect()
}

fn or_missing(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Parsed `<cloudDeviceId>-<deviceNumber>` appliance identifier.
///
/// # Examples
///
/// ```
/// use particle_home::connected_home::ApplianceId;
///
/// let id: ApplianceId = "abc123-0".parse().unwrap();
/// assert_eq!(id.device_id(), "abc123");
/// assert_eq!(id.device_number().value(), 0);
/// assert!("abc123-MISSING-0".parse::<ApplianceId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceId {
    device_id: String,
    device_number: DeviceNumber,
}

impl ApplianceId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(device_id: impl Into<String>, device_number: DeviceNumber) -> Self {
        Self {
            device_id: device_id.into(),
            device_number,
        }
    }

    /// Returns the cloud device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the output number on that device.
    #[must_use]
    pub fn device_number(&self) -> DeviceNumber {
        self.device_number
    }

    /// Builds the `control` command that switches this appliance.
    #[must_use]
    pub fn command(&self, action: SwitchAction) -> ControlCommand {
        ControlCommand::new(self.device_number, action.level())
    }
}

impl FromStr for ApplianceId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::InvalidApplianceId(s.to_string());
        let mut parts = s.split('-');
        let (Some(device_id), Some(number), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if device_id.is_empty() {
            return Err(invalid());
        }
        let number = number.parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(device_id, DeviceNumber::new(number)))
    }
}

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.device_id, self.device_number)
    }
}

/// Requested on/off action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchAction {
    /// Turn the appliance on.
    TurnOn,
    /// Turn the appliance off.
    TurnOff,
}

impl SwitchAction {
    /// Decodes the request's action. Anything but `TURN_ON` turns off.
    #[must_use]
    pub fn from_wire(action: Option<&str>) -> Self {
        if action == Some("TURN_ON") {
            Self::TurnOn
        } else {
            Self::TurnOff
        }
    }

    /// Returns the level this action applies.
    #[must_use]
    pub const fn level(self) -> DeviceLevel {
        match self {
            Self::TurnOn => DeviceLevel::On,
            Self::TurnOff => DeviceLevel::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::descriptor::DescribedDevice;

    #[test]
    fn appliances_use_descriptor_fields() {
        let descriptor = DeviceDescriptor::new("0.1", "Acme", "Relay2")
            .with_device(DescribedDevice::new(0, "Fan", "Ceiling fan"))
            .with_device(DescribedDevice::new(1, "Pump", "Garden pump"));
        let appliances = appliances_from_descriptor("dev1", &descriptor);
        assert_eq!(appliances.len(), 2);
        assert_eq!(appliances[1].appliance_id, "dev1-1");
        assert_eq!(appliances[1].manufacturer_name, "Acme");
        assert_eq!(appliances[1].friendly_description, "Garden pump");
        assert!(appliances[1].is_reachable);
    }

    #[test]
    fn appliances_fill_missing_fields() {
        let descriptor = DeviceDescriptor::from_json(r#"{"devices":[{},{"fn":""}]}"#).unwrap();
        let appliances = appliances_from_descriptor("dev1", &descriptor);
        assert_eq!(appliances[0].appliance_id, "dev1-MISSING-0");
        assert_eq!(appliances[1].appliance_id, "dev1-MISSING-1");
        assert_eq!(appliances[0].manufacturer_name, "Missing Manufacturer Name");
        assert_eq!(appliances[0].model_name, "Missing Model Name");
        assert_eq!(appliances[0].version, "Missing Version String");
        assert_eq!(appliances[1].friendly_name, "Missing Friendly Name");
        assert_eq!(appliances[0].friendly_description, "Missing Description");
    }

    #[test]
    fn appliance_serializes_camel_case() {
        let appliance = appliances_from_descriptor("dev1", &DeviceDescriptor::default())
            .pop()
            .unwrap();
        let json = serde_json::to_value(appliance).unwrap();
        assert_eq!(json["applianceId"], "dev1-0");
        assert_eq!(json["isReachable"], true);
        assert_eq!(json["additionalApplianceDetails"], serde_json::json!({}));
    }

    #[test]
    fn appliance_id_requires_two_parts() {
        assert!("abc".parse::<ApplianceId>().is_err());
        assert!("a-b-c".parse::<ApplianceId>().is_err());
        assert!("-0".parse::<ApplianceId>().is_err());
        assert!("abc-x".parse::<ApplianceId>().is_err());
        assert_eq!(
            "abc-3".parse::<ApplianceId>().unwrap(),
            ApplianceId::new("abc", DeviceNumber::new(3))
        );
    }

    #[test]
    fn appliance_id_display_round_trips() {
        let id = ApplianceId::new("abc", DeviceNumber::PRIMARY);
        assert_eq!(id.to_string(), "abc-0");
    }

    #[test]
    fn switch_action_from_wire() {
        assert_eq!(SwitchAction::from_wire(Some("TURN_ON")), SwitchAction::TurnOn);
        assert_eq!(SwitchAction::from_wire(Some("TURN_OFF")), SwitchAction::TurnOff);
        assert_eq!(SwitchAction::from_wire(None), SwitchAction::TurnOff);
    }

    #[test]
    fn command_for_action() {
        let id = ApplianceId::new("abc", DeviceNumber::PRIMARY);
        assert_eq!(id.command(SwitchAction::TurnOn).argument(), "0.1");
        assert_eq!(id.command(SwitchAction::TurnOff).argument(), "0.0");
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of the published variables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a published variable, as the cloud reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// Integer variable.
    Int(i32),
    /// Text variable.
    Text(String),
}

impl VariableValue {
    /// Returns the integer value, if this is an integer variable.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text value, if this is a text variable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// The three variables a device publishes, captured at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedVariables {
    /// Descriptor JSON (`achStr`).
    #[serde(rename = "achStr")]
    pub descriptor: String,
    /// Last decoded device number (`deviceNum`).
    #[serde(rename = "deviceNum")]
    pub device_num: i32,
    /// Last applied device state (`deviceState`).
    #[serde(rename = "deviceState")]
    pub device_state: i32,
}

impl PublishedVariables {
    /// Name of the descriptor variable.
    pub const DESCRIPTOR: &'static str = "achStr";
    /// Name of the device number variable.
    pub const DEVICE_NUM: &'static str = "deviceNum";
    /// Name of the device state variable.
    pub const DEVICE_STATE: &'static str = "deviceState";
    /// All published variable names, in registration order.
    pub const NAMES: [&'static str; 3] = [Self::DESCRIPTOR, Self::DEVICE_NUM, Self::DEVICE_STATE];

    /// Creates a snapshot.
    #[must_use]
    pub fn new(descriptor: String, device_num: i32, device_state: i32) -> Self {
        Self {
            descriptor,
            device_num,
            device_state,
        }
    }

    /// Looks a variable up by its published name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<VariableValue> {
        match name {
            Self::DESCRIPTOR => Some(VariableValue::Text(self.descriptor.clone())),
            Self::DEVICE_NUM => Some(VariableValue::Int(self.device_num)),
            Self::DEVICE_STATE => Some(VariableValue::Int(self.device_state)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PublishedVariables {
        PublishedVariables::new(r#"{"v":"0.1"}"#.to_string(), 5, 0)
    }

    #[test]
    fn lookup_by_name() {
        let vars = sample();
        assert_eq!(vars.get("deviceNum"), Some(VariableValue::Int(5)));
        assert_eq!(vars.get("deviceState"), Some(VariableValue::Int(0)));
        assert_eq!(
            vars.get("achStr").unwrap().as_text(),
            Some(r#"{"v":"0.1"}"#)
        );
        assert_eq!(vars.get("DeviceNum"), None);
    }

    #[test]
    fn names_are_complete() {
        let vars = sample();
        for name in PublishedVariables::NAMES {
            assert!(vars.get(name).is_some(), "{name} should resolve");
        }
    }

    #[test]
    fn value_deserializes_untagged() {
        let int: VariableValue = serde_json::from_str("1").unwrap();
        assert_eq!(int.as_int(), Some(1));
        let text: VariableValue = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(text.as_text(), Some("hello"));
    }

    #[test]
    fn snapshot_serializes_with_published_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["deviceNum"], 5);
        assert_eq!(json["deviceState"], 0);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-side command interpreter.
//!
//! [`DeviceController`] owns the output pin and the published variables. It
//! is constructed once at startup and then fed each `control` invocation the
//! cloud delivers, one at a time.
//!
//! # Published Variable Semantics
//!
//! - `deviceState` always equals the last level written to the pin. It only
//!   changes when a command is accepted.
//! - `deviceNum` is updated as soon as a command decodes, before the number
//!   and state are validated. A rejected `"5.1"` therefore leaves
//!   `deviceNum == 5`. Cloud skills built against the deployed firmware rely
//!   on this.
//!
//! # Examples
//!
//! ```
//! use particle_home::{ControlStatus, DeviceController, MemoryPin};
//!
//! let pin = MemoryPin::new();
//! let mut controller = DeviceController::new(pin.clone());
//! assert_eq!(pin.level(), Some(true));
//!
//! assert_eq!(controller.handle_command("0.0"), ControlStatus::Accepted);
//! assert_eq!(pin.level(), Some(false));
//! assert_eq!(controller.device_state(), 0);
//!
//! assert_eq!(controller.handle_command("5.1"), ControlStatus::UnknownDevice);
//! assert_eq!(controller.device_num(), 5);
//! ```

use crate::command::{ControlCommand, ControlStatus, NumberParsing};
use crate::descriptor::DeviceDescriptor;
use crate::error::{DeviceError, Error, ParseError};
use crate::output::OutputSink;
use crate::state::{PublishedVariables, VariableValue};
use crate::types::{DeviceLevel, DeviceNumber};

const CONTROL_FUNCTION: &str = "control";

/// Startup configuration of a [`DeviceController`].
///
/// # Examples
///
/// ```
/// use particle_home::{ControllerConfig, NumberParsing};
/// use particle_home::types::DeviceLevel;
///
/// let config = ControllerConfig::new()
///     .with_initial_level(DeviceLevel::Off)
///     .with_number_parsing(NumberParsing::Strict);
/// assert_eq!(config.initial_level(), DeviceLevel::Off);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    initial_level: DeviceLevel,
    number_parsing: NumberParsing,
    descriptor: DeviceDescriptor,
}

impl ControllerConfig {
    /// Level written to the output at startup.
    pub const DEFAULT_INITIAL_LEVEL: DeviceLevel = DeviceLevel::On;

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_level: Self::DEFAULT_INITIAL_LEVEL,
            number_parsing: NumberParsing::default(),
            descriptor: DeviceDescriptor::default(),
        }
    }

    /// Sets the level written at startup.
    #[must_use]
    pub fn with_initial_level(mut self, level: DeviceLevel) -> Self {
        self.initial_level = level;
        self
    }

    /// Sets how command fields are decoded.
    #[must_use]
    pub fn with_number_parsing(mut self, parsing: NumberParsing) -> Self {
        self.number_parsing = parsing;
        self
    }

    /// Sets the published descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: DeviceDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Returns the startup level.
    #[must_use]
    pub fn initial_level(&self) -> DeviceLevel {
        self.initial_level
    }

    /// Returns the number parsing mode.
    #[must_use]
    pub fn number_parsing(&self) -> NumberParsing {
        self.number_parsing
    }

    /// Returns the descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-output device controller.
#[derive(Debug)]
pub struct DeviceController<S: OutputSink> {
    output: S,
    number_parsing: NumberParsing,
    descriptor: DeviceDescriptor,
    descriptor_json: String,
    device_num: DeviceNumber,
    device_state: DeviceLevel,
}

impl<S: OutputSink> DeviceController<S> {
    /// Name of the registered control function.
    pub const CONTROL_FUNCTION: &'static str = CONTROL_FUNCTION;
    /// All registered function names.
    pub const FUNCTION_NAMES: [&'static str; 1] = [CONTROL_FUNCTION];

    /// Starts a controller with the default configuration.
    ///
    /// The output is driven HIGH and `deviceState` starts at `1`.
    pub fn new(output: S) -> Self {
        // The default descriptor always serializes.
        Self::with_parts(output, ControllerConfig::new(), default_descriptor_json())
    }

    /// Starts a controller with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the descriptor cannot be serialized.
    pub fn with_config(output: S, config: ControllerConfig) -> Result<Self, Error> {
        let json = config.descriptor.to_json()?;
        Ok(Self::with_parts(output, config, json))
    }

    fn with_parts(mut output: S, config: ControllerConfig, descriptor_json: String) -> Self {
        output.set_level(config.initial_level.as_bool());
        tracing::info!(
            level = %config.initial_level,
            parsing = ?config.number_parsing,
            "Device controller started"
        );

        Self {
            output,
            number_parsing: config.number_parsing,
            descriptor: config.descriptor,
            descriptor_json,
            device_num: DeviceNumber::PRIMARY,
            device_state: config.initial_level,
        }
    }

    /// Interprets one `control` command string.
    ///
    /// Returns [`ControlStatus::Accepted`] after writing the requested level,
    /// or the reason the command was rejected. Only an accepted command
    /// touches the output and `deviceState`.
    pub fn handle_command(&mut self, command: &str) -> ControlStatus {
        let decoded = match ControlCommand::parse(command, self.number_parsing) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(command, error = %err, "Rejected malformed command");
                return err.into();
            }
        };

        self.device_num = decoded.device();
        tracing::debug!(
            device = %decoded.device(),
            state = decoded.state(),
            "Decoded control command"
        );

        if !decoded.device().is_supported() {
            tracing::warn!(device = %decoded.device(), "Rejected unknown device");
            return ControlStatus::UnknownDevice;
        }

        let Some(level) = decoded.level() else {
            tracing::warn!(state = decoded.state(), "Rejected out of range state");
            return ControlStatus::InvalidState;
        };

        self.output.set_level(level.as_bool());
        self.device_state = level;
        ControlStatus::Accepted
    }

    /// Dispatches a cloud function call by name.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownFunction` for anything but `control`.
    pub fn call_function(&mut self, name: &str, argument: &str) -> Result<i32, Error> {
        if name == CONTROL_FUNCTION {
            Ok(self.handle_command(argument).code())
        } else {
            Err(DeviceError::UnknownFunction(name.to_string()).into())
        }
    }

    /// Reads a published variable by name.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownVariable` if no such variable exists.
    pub fn variable(&self, name: &str) -> Result<VariableValue, Error> {
        self.published()
            .get(name)
            .ok_or_else(|| DeviceError::UnknownVariable(name.to_string()).into())
    }

    /// Returns a snapshot of all published variables.
    #[must_use]
    pub fn published(&self) -> PublishedVariables {
        PublishedVariables::new(
            self.descriptor_json.clone(),
            self.device_num.value(),
            self.device_state.as_num(),
        )
    }

    /// Returns the last decoded device number.
    #[must_use]
    pub fn device_num(&self) -> i32 {
        self.device_num.value()
    }

    /// Returns the last applied device state (`0` or `1`).
    #[must_use]
    pub fn device_state(&self) -> i32 {
        self.device_state.as_num()
    }

    /// Returns the last applied level.
    #[must_use]
    pub fn level(&self) -> DeviceLevel {
        self.device_state
    }

    /// Returns the published descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// Returns the published descriptor string.
    #[must_use]
    pub fn descriptor_json(&self) -> &str {
        &self.descriptor_json
    }

    /// Returns the number parsing mode in use.
    #[must_use]
    pub fn number_parsing(&self) -> NumberParsing {
        self.number_parsing
    }

    /// Consumes the controller and returns the output.
    pub fn into_output(self) -> S {
        self.output
    }
}

fn default_descriptor_json() -> String {
    DeviceDescriptor::default()
        .to_json()
        .unwrap_or_else(|err: ParseError| {
            tracing::warn!(error = %err, "Descriptor serialization failed");
            String::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryPin;

    fn started() -> (DeviceController<MemoryPin>, MemoryPin) {
        let pin = MemoryPin::new();
        (DeviceController::new(pin.clone()), pin)
    }

    #[test]
    fn startup_drives_output_high() {
        let (controller, pin) = started();
        assert_eq!(pin.level(), Some(true));
        assert_eq!(pin.write_count(), 1);
        assert_eq!(controller.device_state(), 1);
        assert_eq!(controller.device_num(), 0);
    }

    #[test]
    fn startup_level_is_configurable() {
        let pin = MemoryPin::new();
        let controller = DeviceController::with_config(
            pin.clone(),
            ControllerConfig::new().with_initial_level(DeviceLevel::Off),
        )
        .unwrap();
        assert_eq!(pin.level(), Some(false));
        assert_eq!(controller.level(), DeviceLevel::Off);
    }

    #[test]
    fn accepted_command_writes_output() {
        let (mut controller, pin) = started();
        assert_eq!(controller.handle_command("0.0"), ControlStatus::Accepted);
        assert_eq!(pin.level(), Some(false));
        assert_eq!(controller.device_state(), 0);
        assert_eq!(controller.handle_command("0.1"), ControlStatus::Accepted);
        assert_eq!(pin.level(), Some(true));
        assert_eq!(controller.device_state(), 1);
    }

    #[test]
    fn malformed_command_changes_nothing() {
        let (mut controller, pin) = started();
        controller.handle_command("3.1");
        for input in ["abc", ".1", "", "."] {
            assert_eq!(controller.handle_command(input), ControlStatus::Malformed);
        }
        assert_eq!(controller.device_num(), 3);
        assert_eq!(controller.device_state(), 1);
        assert_eq!(pin.write_count(), 1);
    }

    #[test]
    fn unknown_device_updates_device_num_only() {
        let (mut controller, pin) = started();
        assert_eq!(controller.handle_command("1.0"), ControlStatus::UnknownDevice);
        assert_eq!(controller.device_num(), 1);
        assert_eq!(controller.device_state(), 1);
        assert_eq!(pin.write_count(), 1);
    }

    #[test]
    fn invalid_state_keeps_output() {
        let (mut controller, pin) = started();
        controller.handle_command("0.0");
        assert_eq!(controller.handle_command("0.9"), ControlStatus::InvalidState);
        assert_eq!(controller.handle_command("0.-1"), ControlStatus::InvalidState);
        assert_eq!(controller.device_state(), 0);
        assert_eq!(pin.level(), Some(false));
        assert_eq!(pin.write_count(), 2);
    }

    #[test]
    fn lenient_parsing_treats_garbage_as_zero() {
        let (mut controller, pin) = started();
        assert_eq!(controller.handle_command("x.off"), ControlStatus::Accepted);
        assert_eq!(pin.level(), Some(false));
    }

    #[test]
    fn strict_parsing_rejects_garbage_without_side_effects() {
        let pin = MemoryPin::new();
        let mut controller = DeviceController::with_config(
            pin.clone(),
            ControllerConfig::new().with_number_parsing(NumberParsing::Strict),
        )
        .unwrap();
        controller.handle_command("4.1");
        assert_eq!(controller.handle_command("0.off"), ControlStatus::Malformed);
        assert_eq!(controller.device_num(), 4);
        assert_eq!(pin.level(), Some(true));
        assert_eq!(controller.handle_command("0.0"), ControlStatus::Accepted);
    }

    #[test]
    fn call_function_dispatches_control() {
        let (mut controller, _pin) = started();
        assert_eq!(controller.call_function("control", "0.0").unwrap(), 1);
        assert_eq!(controller.call_function("control", "7.0").unwrap(), -2);
        assert!(matches!(
            controller.call_function("blink", "0.1"),
            Err(Error::Device(DeviceError::UnknownFunction(_)))
        ));
    }

    #[test]
    fn variables_reflect_state() {
        let (mut controller, _pin) = started();
        controller.handle_command("0.0");
        assert_eq!(
            controller.variable("deviceState").unwrap(),
            VariableValue::Int(0)
        );
        assert_eq!(
            controller.variable("achStr").unwrap().as_text(),
            Some(controller.descriptor_json())
        );
        assert!(matches!(
            controller.variable("nope"),
            Err(Error::Device(DeviceError::UnknownVariable(_)))
        ));
    }

    #[test]
    fn custom_descriptor_is_published() {
        let descriptor = DeviceDescriptor::new("2.0", "Acme", "Relay");
        let controller = DeviceController::with_config(
            MemoryPin::new(),
            ControllerConfig::new().with_descriptor(descriptor.clone()),
        )
        .unwrap();
        assert_eq!(controller.descriptor(), &descriptor);
        assert_eq!(
            DeviceDescriptor::from_json(controller.descriptor_json()).unwrap(),
            descriptor
        );
    }
}

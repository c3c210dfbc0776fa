// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `control` command string.

use std::fmt;

use thiserror::Error;

use crate::command::{Command, ControlStatus, parse_leading_int};
use crate::types::{DeviceLevel, DeviceNumber};

/// Delimiter between the device number and the device state.
pub(crate) const DELIMITER: char = '.';

/// How the two numeric fields of a command string are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberParsing {
    /// Leading digits are decoded and anything unparsable becomes `0`.
    ///
    /// This matches the deployed firmware: `"0.abc"` turns the device off.
    #[default]
    Lenient,
    /// Each field must be a complete integer (surrounding whitespace
    /// allowed). Anything else makes the whole command malformed.
    Strict,
}

/// Why a command string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCommand {
    /// The string contains no `.`.
    #[error("missing '.' delimiter")]
    MissingDelimiter,

    /// The string starts with `.`, so the device number is empty.
    #[error("empty device number")]
    EmptyDeviceNumber,

    /// A field is not an integer (strict parsing only).
    #[error("{field} is not an integer: {value:?}")]
    NotAnInteger {
        /// Which field failed.
        field: &'static str,
        /// The offending substring.
        value: String,
    },
}

impl From<MalformedCommand> for ControlStatus {
    fn from(_: MalformedCommand) -> Self {
        Self::Malformed
    }
}

/// A decoded `"<deviceNum>.<deviceState>"` command.
///
/// Decoding only splits and converts the two fields; range validation is
/// left to the controller so it can publish the device number first.
///
/// # Examples
///
/// ```
/// use particle_home::command::{ControlCommand, MalformedCommand, NumberParsing};
///
/// let cmd = ControlCommand::parse("5.9", NumberParsing::Lenient).unwrap();
/// assert_eq!(cmd.device().value(), 5);
/// assert_eq!(cmd.state(), 9);
///
/// assert_eq!(
///     ControlCommand::parse(".1", NumberParsing::Lenient),
///     Err(MalformedCommand::EmptyDeviceNumber)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCommand {
    device: DeviceNumber,
    state: i32,
}

impl ControlCommand {
    /// Creates a command for a known level.
    #[must_use]
    pub const fn new(device: DeviceNumber, level: DeviceLevel) -> Self {
        Self {
            device,
            state: level.as_num(),
        }
    }

    /// Creates a command from raw field values, which may be out of range.
    #[must_use]
    pub const fn from_raw(device: i32, state: i32) -> Self {
        Self {
            device: DeviceNumber::new(device),
            state,
        }
    }

    /// Decodes a command string.
    ///
    /// The string is split at the first `.`; everything after it, further
    /// dots included, is the state field.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedCommand`] if the delimiter is missing or at
    /// position 0, or, with [`NumberParsing::Strict`], if either field is not
    /// an integer.
    pub fn parse(input: &str, parsing: NumberParsing) -> Result<Self, MalformedCommand> {
        let (device, state) = match input.find(DELIMITER) {
            None => return Err(MalformedCommand::MissingDelimiter),
            Some(0) => return Err(MalformedCommand::EmptyDeviceNumber),
            Some(index) => (&input[..index], &input[index + DELIMITER.len_utf8()..]),
        };

        let (device, state) = match parsing {
            NumberParsing::Lenient => (parse_leading_int(device), parse_leading_int(state)),
            NumberParsing::Strict => (
                parse_strict("device number", device)?,
                parse_strict("device state", state)?,
            ),
        };

        Ok(Self::from_raw(device, state))
    }

    /// Returns the addressed device.
    #[must_use]
    pub const fn device(&self) -> DeviceNumber {
        self.device
    }

    /// Returns the requested state as decoded, possibly out of range.
    #[must_use]
    pub const fn state(&self) -> i32 {
        self.state
    }

    /// Returns the requested level if the state is `0` or `1`.
    #[must_use]
    pub fn level(&self) -> Option<DeviceLevel> {
        DeviceLevel::try_from(self.state).ok()
    }
}

fn parse_strict(field: &'static str, value: &str) -> Result<i32, MalformedCommand> {
    value
        .trim()
        .parse()
        .map_err(|_| MalformedCommand::NotAnInteger {
            field,
            value: value.to_string(),
        })
}

impl Command for ControlCommand {
    fn name(&self) -> String {
        "control".to_string()
    }

    fn argument(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.device, self.state)
    }
}

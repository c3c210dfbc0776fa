// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status codes returned by the `control` function.

use std::fmt;

use crate::error::ValueError;

/// Outcome of one `control` invocation.
///
/// Only [`ControlStatus::Accepted`] changes the output pin. The numeric
/// codes are the contract with the cloud caller and never change.
///
/// # Examples
///
/// ```
/// use particle_home::command::ControlStatus;
///
/// assert_eq!(ControlStatus::Accepted.code(), 1);
/// assert_eq!(ControlStatus::try_from(-2).unwrap(), ControlStatus::UnknownDevice);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlStatus {
    /// Command accepted; pin state updated.
    Accepted,
    /// Delimiter missing or in an invalid position.
    Malformed,
    /// Device number is not supported.
    UnknownDevice,
    /// Device number valid but requested state out of range.
    InvalidState,
}

impl ControlStatus {
    /// Returns the signed status code sent back to the caller.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Accepted => 1,
            Self::Malformed => -1,
            Self::UnknownDevice => -2,
            Self::InvalidState => -3,
        }
    }

    /// Returns `true` if the command was applied.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns a short human readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Accepted => "command accepted",
            Self::Malformed => "malformed command",
            Self::UnknownDevice => "unknown device number",
            Self::InvalidState => "device state out of range",
        }
    }
}

impl From<ControlStatus> for i32 {
    fn from(status: ControlStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for ControlStatus {
    type Error = ValueError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Accepted),
            -1 => Ok(Self::Malformed),
            -2 => Ok(Self::UnknownDevice),
            -3 => Ok(Self::InvalidState),
            actual => Err(ValueError::OutOfRange {
                min: -3,
                max: 1,
                actual,
            }),
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output level type.

use std::fmt;

use crate::error::ValueError;

/// Binary level of the controlled output (LED or relay).
///
/// The numeric form (`0`/`1`) is what the command string carries and what the
/// `deviceState` variable publishes.
///
/// # Examples
///
/// ```
/// use particle_home::types::DeviceLevel;
///
/// assert_eq!(DeviceLevel::try_from(1).unwrap(), DeviceLevel::On);
/// assert_eq!(DeviceLevel::Off.as_num(), 0);
/// assert!(DeviceLevel::try_from(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceLevel {
    /// Pin driven LOW.
    #[default]
    Off,
    /// Pin driven HIGH.
    On,
}

impl DeviceLevel {
    /// Returns the numeric value published to the cloud.
    #[must_use]
    pub const fn as_num(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Returns `true` for [`DeviceLevel::On`].
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::On)
    }
}

impl TryFrom<i32> for DeviceLevel {
    type Error = ValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            actual => Err(ValueError::OutOfRange {
                min: 0,
                max: 1,
                actual,
            }),
        }
    }
}

impl From<bool> for DeviceLevel {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<DeviceLevel> for bool {
    fn from(value: DeviceLevel) -> Self {
        value.as_bool()
    }
}

impl fmt::Display for DeviceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_valid_numbers() {
        assert_eq!(DeviceLevel::try_from(0).unwrap(), DeviceLevel::Off);
        assert_eq!(DeviceLevel::try_from(1).unwrap(), DeviceLevel::On);
    }

    #[test]
    fn level_from_out_of_range() {
        for value in [-1, 2, 9, i32::MAX] {
            let err = DeviceLevel::try_from(value).unwrap_err();
            assert_eq!(
                err,
                ValueError::OutOfRange {
                    min: 0,
                    max: 1,
                    actual: value
                }
            );
        }
    }

    #[test]
    fn level_bool_conversions() {
        assert_eq!(DeviceLevel::from(true), DeviceLevel::On);
        assert!(!bool::from(DeviceLevel::Off));
    }

    #[test]
    fn level_display() {
        assert_eq!(DeviceLevel::On.to_string(), "ON");
        assert_eq!(DeviceLevel::Off.to_string(), "OFF");
    }
}

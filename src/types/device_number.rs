// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device index type.

use std::fmt;

/// Index of the output a command addresses.
///
/// Any integer can be decoded from a command string, so the type is not
/// range-checked on construction. Only [`DeviceNumber::PRIMARY`] is wired to
/// an output.
///
/// # Examples
///
/// ```
/// use particle_home::types::DeviceNumber;
///
/// assert!(DeviceNumber::PRIMARY.is_supported());
/// assert!(!DeviceNumber::new(5).is_supported());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceNumber(i32);

impl DeviceNumber {
    /// The single supported output.
    pub const PRIMARY: Self = Self(0);

    /// Wraps a decoded device number.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` if this number addresses a wired output.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        self.0 == Self::PRIMARY.0
    }
}

impl From<i32> for DeviceNumber {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primary_is_supported() {
        assert!(DeviceNumber::new(0).is_supported());
        assert!(!DeviceNumber::new(1).is_supported());
        assert!(!DeviceNumber::new(-1).is_supported());
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(DeviceNumber::new(-7).to_string(), "-7");
        assert_eq!(DeviceNumber::PRIMARY.to_string(), "0");
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for device control.
//!
//! # Types
//!
//! - [`DeviceLevel`] - Binary on/off level driven onto the output pin
//! - [`DeviceNumber`] - Index of the controlled output addressed by a command

mod device_number;
mod level;

pub use device_number::DeviceNumber;
pub use level::DeviceLevel;

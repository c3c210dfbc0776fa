// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Published device variables.
//!
//! A device exposes three read-only variables to the cloud:
//!
//! | Name | Type | Content |
//! |------|------|---------|
//! | `achStr` | text | [`DeviceDescriptor`](crate::DeviceDescriptor) JSON |
//! | `deviceNum` | int | Last decoded device number |
//! | `deviceState` | int | Last level written to the output |
//!
//! # Examples
//!
//! ```
//! use particle_home::state::{PublishedVariables, VariableValue};
//!
//! let vars = PublishedVariables::new("{}".to_string(), 0, 1);
//! assert_eq!(vars.get("deviceState"), Some(VariableValue::Int(1)));
//! assert_eq!(vars.get("missing"), None);
//! ```

mod published;

pub use published::{PublishedVariables, VariableValue};

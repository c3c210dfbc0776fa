// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud function commands.
//!
//! The device registers exactly one remotely invocable function, `control`,
//! which takes a `"<deviceNum>.<deviceState>"` argument and answers with a
//! signed status code.
//!
//! | Code | [`ControlStatus`] | Meaning |
//! |------|-------------------|---------|
//! | `1`  | `Accepted`        | Pin state updated |
//! | `-1` | `Malformed`       | Delimiter missing or at position 0 |
//! | `-2` | `UnknownDevice`   | Device number is not `0` |
//! | `-3` | `InvalidState`    | State is not `0` or `1` |
//!
//! # Examples
//!
//! ```
//! use particle_home::command::{Command, ControlCommand, NumberParsing};
//!
//! let cmd = ControlCommand::parse("0.1", NumberParsing::Lenient).unwrap();
//! assert_eq!(cmd.device().value(), 0);
//! assert_eq!(cmd.state(), 1);
//! assert_eq!(cmd.name(), "control");
//! assert_eq!(cmd.argument(), "0.1");
//! ```

mod control;
mod number;
mod status;

pub use control::{ControlCommand, MalformedCommand, NumberParsing};
pub use number::parse_leading_int;
pub use status::ControlStatus;

/// A function call that can be sent to a device through the cloud.
pub trait Command {
    /// Returns the registered function name.
    fn name(&self) -> String;

    /// Returns the single text argument passed to the function.
    fn argument(&self) -> String;
}

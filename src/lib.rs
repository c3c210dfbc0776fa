// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `particle_home` - Cloud-controlled single output device and its
//! Connected Home adapter.
//!
//! The device side is a tiny command interpreter: it publishes three
//! read-only variables and registers one `control` function that switches an
//! LED or relay from a `"<deviceNum>.<deviceState>"` string. The cloud side
//! turns voice assistant discovery and on/off requests into Particle Cloud
//! variable reads and function calls.
//!
//! # Device Side
//!
//! ```
//! use particle_home::{ControlStatus, DeviceController, MemoryPin};
//!
//! let pin = MemoryPin::new();
//! let mut controller = DeviceController::new(pin.clone());
//!
//! assert_eq!(controller.handle_command("0.0"), ControlStatus::Accepted);
//! assert_eq!(pin.level(), Some(false));
//! assert_eq!(controller.handle_command("0.9"), ControlStatus::InvalidState);
//! assert_eq!(controller.handle_command("abc").code(), -1);
//! ```
//!
//! # Cloud Side
//!
//! ```no_run
//! use particle_home::cloud::{CloudClient, CloudConfig};
//! use particle_home::connected_home::ConnectedHomeAdapter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = ConnectedHomeAdapter::new(CloudClient::new(CloudConfig::default())?);
//! let appliances = adapter.discover_appliances("access-token").await?;
//! for appliance in appliances {
//!     println!("{} - {}", appliance.appliance_id, appliance.friendly_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cloud;
pub mod command;
pub mod connected_home;
mod controller;
mod descriptor;
pub mod error;
pub mod output;
pub mod state;
pub mod types;

pub use command::{Command, ControlCommand, ControlStatus, MalformedCommand, NumberParsing};
pub use controller::{ControllerConfig, DeviceController};
pub use descriptor::{DescribedDevice, DeviceDescriptor};
pub use error::{
    AdapterError, ControlError, DeviceError, Error, ParseError, ProtocolError, Result, ValueError,
};
pub use output::{MemoryPin, OutputSink};
pub use state::{PublishedVariables, VariableValue};
pub use types::{DeviceLevel, DeviceNumber};

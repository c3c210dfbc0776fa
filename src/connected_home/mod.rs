// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Voice assistant (Connected Home) adapter.
//!
//! The adapter answers two kinds of requests on behalf of an account's
//! devices:
//!
//! - **Discovery**: every connected device's `achStr` descriptor is read and
//!   expanded into appliances with ids `<cloudDeviceId>-<deviceNumber>`.
//! - **Control**: a `SwitchOnOffRequest` for appliance `<id>-<n>` becomes a
//!   `control` call with argument `"<n>.1"` (on) or `"<n>.0"` (off).
//!
//! Control failures are reported to the assistant as an error message built
//! by [`AdapterError::to_message`](crate::error::AdapterError::to_message):
//!
//! | Code | When |
//! |------|------|
//! | `UNSUPPORTED_OPERATION` | Request name is not `SwitchOnOffRequest` |
//! | `UNEXPECTED_INFORMATION_RECEIVED` | Bad token or appliance id, or the device returned a status other than `1` |
//! | `DEPENDENT_SERVICE_UNAVAILABLE` | The cloud call failed or timed out |

mod adapter;
mod appliance;
mod message;

pub use adapter::{AdapterConfig, ConnectedHomeAdapter};
pub use appliance::{ApplianceId, DiscoveredAppliance, SwitchAction, appliances_from_descriptor};
pub use message::{ControlErrorCode, Header, Message, PAYLOAD_VERSION, name, namespace};

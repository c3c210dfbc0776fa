// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Digital output abstraction.
//!
//! The controller never touches hardware directly. It drives an
//! [`OutputSink`], which on a board wraps the GPIO write and in tests or host
//! simulations is a [`MemoryPin`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::DeviceLevel;

/// A single digital output.
pub trait OutputSink {
    /// Drives the output HIGH (`true`) or LOW (`false`).
    fn set_level(&mut self, high: bool);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn set_level(&mut self, high: bool) {
        (**self).set_level(high);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn set_level(&mut self, high: bool) {
        (**self).set_level(high);
    }
}

#[derive(Debug, Default)]
struct PinState {
    level: Option<bool>,
    writes: usize,
}

/// In-memory output pin.
///
/// Clones share the same pin, so a test can hand one clone to the controller
/// and keep another to observe what was written.
///
/// # Examples
///
/// ```
/// use particle_home::output::{MemoryPin, OutputSink};
///
/// let pin = MemoryPin::new();
/// let mut sink = pin.clone();
/// sink.set_level(true);
///
/// assert_eq!(pin.level(), Some(true));
/// assert_eq!(pin.write_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryPin {
    inner: Arc<Mutex<PinState>>,
}

impl MemoryPin {
    /// Creates a pin that has never been written.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last written level, or `None` before the first write.
    #[must_use]
    pub fn level(&self) -> Option<bool> {
        self.inner.lock().level
    }

    /// Returns the last written level as a [`DeviceLevel`].
    #[must_use]
    pub fn device_level(&self) -> Option<DeviceLevel> {
        self.level().map(DeviceLevel::from)
    }

    /// Returns how many times the pin was written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }
}

impl OutputSink for MemoryPin {
    fn set_level(&mut self, high: bool) {
        let mut state = self.inner.lock();
        state.level = Some(high);
        state.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pin_is_unwritten() {
        let pin = MemoryPin::new();
        assert_eq!(pin.level(), None);
        assert_eq!(pin.write_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let pin = MemoryPin::new();
        let mut writer = pin.clone();
        writer.set_level(false);
        writer.set_level(true);
        assert_eq!(pin.device_level(), Some(DeviceLevel::On));
        assert_eq!(pin.write_count(), 2);
    }

    #[test]
    fn boxed_sink_forwards() {
        let pin = MemoryPin::new();
        let mut boxed: Box<dyn OutputSink> = Box::new(pin.clone());
        boxed.set_level(true);
        assert_eq!(pin.level(), Some(true));
    }

    #[test]
    fn borrowed_sink_forwards() {
        fn drive_low<S: OutputSink>(mut sink: S) {
            sink.set_level(false);
        }

        let mut pin = MemoryPin::new();
        drive_low(&mut pin);
        assert_eq!(pin.level(), Some(false));
    }
}

// SPDX-License-Identifier: MPL-2.0

use core::sync::atomic::{AtomicU32, Ordering};

use crate::prelude::*;

bitflags! {
    /// The `poll()` event bits.
    pub struct IoEvents: u32 {
        const IN    = 0x0001;
        const PRI   = 0x0002;
        const OUT   = 0x0004;
        const ERR   = 0x0008;
        const HUP   = 0x0010;
        const NVAL  = 0x0020;
        const RDHUP = 0x2000;
    }
}

/// The output event slot of a poll descriptor.
///
/// The slot is written by the polled object, possibly from a deferred-work
/// context long after the poll was set up, and read by the polling thread.
#[derive(Debug, Default)]
pub struct PollEvents(AtomicU32);

impl PollEvents {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Returns the reported events.
    pub fn get(&self) -> IoEvents {
        IoEvents::from_bits_truncate(self.0.load(Ordering::Acquire))
    }

    /// Replaces the reported events.
    pub fn set(&self, events: IoEvents) {
        self.0.store(events.bits(), Ordering::Release);
    }

    /// Adds `events` to the reported events.
    pub fn insert(&self, events: IoEvents) {
        self.0.fetch_or(events.bits(), Ordering::AcqRel);
    }
}

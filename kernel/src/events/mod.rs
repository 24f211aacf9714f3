// SPDX-License-Identifier: MPL-2.0

mod io_events;

pub use self::io_events::{IoEvents, PollEvents};

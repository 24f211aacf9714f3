// SPDX-License-Identifier: MPL-2.0

//! The netlink socket address family.
//!
//! The crate provides the generic socket layer that dispatches socket calls
//! to per-family operation tables ([`net::socket::SockIntf`]), and the
//! operation table of netlink sockets ([`net::socket::netlink::NetlinkSockIntf`]):
//! connection lifecycle and reference counting, addressing, message framing,
//! response queues and the poll/wait coordination of readers.
//!
//! The embedding kernel registers the family, creates sockets on behalf of
//! processes, and drives the family's work queue to deliver wake-ups.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod error;
pub mod events;
pub mod net;
mod prelude;
pub mod process;
pub mod sync;
pub mod thread;

pub use self::error::{Errno, Error};

pub type Result<T> = core::result::Result<T, Error>;

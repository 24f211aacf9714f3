// SPDX-License-Identifier: MPL-2.0

//! Netlink message framing.
//!
//! A netlink message starts with a [`CMsgSegHdr`] whose `len` field covers
//! the whole message. The payload that follows is defined by the
//! sub-protocol and is opaque to the socket layer, which only validates the
//! framing before handing the message to a payload handler.

mod ack;
mod header;

pub use self::{
    ack::{CMsgSegErr, done_segment, error_segment},
    header::{CMsgSegHdr, SegHdrCommonFlags},
};
use crate::prelude::*;

/// Netlink messages are aligned to 4 bytes.
pub const NLMSG_ALIGN: usize = 4;

/// Segment types.
///
/// The standard types come first, followed by the `NETLINK_ROUTE` types that
/// the socket layer recognizes.
///
/// Reference: <https://elixir.bootlin.com/linux/v6.13/source/include/uapi/linux/rtnetlink.h>.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CSegmentType {
    // Standard netlink message types
    NOOP = 1,
    ERROR = 2,
    DONE = 3,
    OVERRUN = 4,

    // NETLINK_ROUTE message types
    NEWLINK = 16,
    DELLINK = 17,
    GETLINK = 18,
    SETLINK = 19,

    NEWADDR = 20,
    DELADDR = 21,
    GETADDR = 22,

    NEWROUTE = 24,
    DELROUTE = 25,
    GETROUTE = 26,

    GETNEIGH = 30,
}

impl TryFrom<u16> for CSegmentType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        let type_ = match value {
            1 => Self::NOOP,
            2 => Self::ERROR,
            3 => Self::DONE,
            4 => Self::OVERRUN,
            16 => Self::NEWLINK,
            17 => Self::DELLINK,
            18 => Self::GETLINK,
            19 => Self::SETLINK,
            20 => Self::NEWADDR,
            21 => Self::DELADDR,
            22 => Self::GETADDR,
            24 => Self::NEWROUTE,
            25 => Self::DELROUTE,
            26 => Self::GETROUTE,
            30 => Self::GETNEIGH,
            _ => return_errno_with_message!(Errno::EINVAL, "the segment type is unknown"),
        };

        Ok(type_)
    }
}

impl CSegmentType {
    /// Returns whether the type is a `GET*` request of `NETLINK_ROUTE`.
    pub const fn is_get_request(&self) -> bool {
        matches!(
            self,
            Self::GETLINK | Self::GETADDR | Self::GETROUTE | Self::GETNEIGH
        )
    }
}

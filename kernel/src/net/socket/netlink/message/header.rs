// SPDX-License-Identifier: MPL-2.0

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::prelude::*;

/// `nlmsghdr` in Linux.
///
/// Reference: <https://elixir.bootlin.com/linux/v6.13/source/include/uapi/linux/netlink.h#L52>.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct CMsgSegHdr {
    /// Length of the message, including the header
    pub len: u32,
    /// Type of message content
    pub type_: u16,
    /// Additional flags
    pub flags: u16,
    /// Sequence number
    pub seq: u32,
    /// Sending process port ID
    pub pid: u32,
}

impl CMsgSegHdr {
    /// The length of the header.
    pub const LEN: usize = size_of::<Self>();

    /// Reads and validates the header at the start of `buf`.
    ///
    /// `buf` must hold the whole message: the declared length may be
    /// neither smaller than the header nor larger than `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let Ok((header, _)) = Self::read_from_prefix(buf) else {
            return_errno_with_message!(Errno::EINVAL, "the message is shorter than its header");
        };

        let len = header.len as usize;
        if len < Self::LEN {
            return_errno_with_message!(Errno::EINVAL, "the message length is too small");
        }
        if len > buf.len() {
            return_errno_with_message!(Errno::EINVAL, "the message length exceeds the buffer");
        }

        Ok(header)
    }

    /// Returns the message flags.
    pub fn flags(&self) -> SegHdrCommonFlags {
        SegHdrCommonFlags::from_bits_truncate(self.flags)
    }
}

bitflags! {
    /// Common flags used in [`CMsgSegHdr`].
    ///
    /// Reference: <https://elixir.bootlin.com/linux/v6.13/source/include/uapi/linux/netlink.h#L62>.
    pub struct SegHdrCommonFlags: u16 {
        /// Indicates a request message
        const REQUEST = 0x01;
        /// Multipart message, terminated by NLMSG_DONE
        const MULTI = 0x02;
        /// Reply with an acknowledgment, with zero or error code
        const ACK = 0x04;
        /// Echo this request
        const ECHO = 0x08;
        /// Dump was inconsistent due to sequence change
        const DUMP_INTR = 0x10;
        /// Dump was filtered as requested
        const DUMP_FILTERED = 0x20;

        // Modifiers to GET requests

        /// Specify the tree root
        const ROOT = 0x100;
        /// Return all matching entries
        const MATCH = 0x200;
        /// Atomic get
        const ATOMIC = 0x400;
        /// Full dump
        const DUMP = Self::ROOT.bits | Self::MATCH.bits;
    }
}

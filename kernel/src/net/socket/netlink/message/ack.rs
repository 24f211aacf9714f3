// SPDX-License-Identifier: MPL-2.0

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{CMsgSegHdr, CSegmentType, NLMSG_ALIGN, SegHdrCommonFlags};
use crate::prelude::*;

/// `nlmsgerr` in Linux.
///
/// Reference: <https://elixir.bootlin.com/linux/v6.13/source/include/uapi/linux/netlink.h#L119>.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct CMsgSegErr {
    /// Negative errno or 0 for acknowledgements
    pub error: i32,
    /// The header of the message that caused the error
    pub msg: CMsgSegHdr,
}

/// Builds the `NLMSG_DONE` segment that terminates a dump.
pub fn done_segment(request: &CMsgSegHdr, port: u32) -> Vec<u8> {
    let len = CMsgSegHdr::LEN + size_of::<i32>();
    debug_assert_eq!(len % NLMSG_ALIGN, 0);
    let header = CMsgSegHdr {
        len: len as u32,
        type_: CSegmentType::DONE as u16,
        flags: SegHdrCommonFlags::MULTI.bits(),
        seq: request.seq,
        pid: port,
    };

    let mut segment = Vec::with_capacity(len);
    segment.extend_from_slice(header.as_bytes());
    segment.extend_from_slice(0i32.as_bytes());
    segment
}

/// Builds the `NLMSG_ERROR` segment that answers `request` with `errno`.
pub fn error_segment(request: &CMsgSegHdr, port: u32, errno: Errno) -> Vec<u8> {
    let len = CMsgSegHdr::LEN + size_of::<CMsgSegErr>();
    debug_assert_eq!(len % NLMSG_ALIGN, 0);
    let header = CMsgSegHdr {
        len: len as u32,
        type_: CSegmentType::ERROR as u16,
        flags: 0,
        seq: request.seq,
        pid: port,
    };
    let body = CMsgSegErr {
        error: -(errno as i32),
        msg: *request,
    };

    let mut segment = Vec::with_capacity(len);
    segment.extend_from_slice(header.as_bytes());
    segment.extend_from_slice(body.as_bytes());
    segment
}

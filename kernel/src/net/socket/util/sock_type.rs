// SPDX-License-Identifier: MPL-2.0

use crate::prelude::*;

/// Socket types.
/// From https://elixir.bootlin.com/linux/v6.0.9/source/include/linux/net.h
#[repr(i32)]
#[expect(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SockType {
    /// Stream socket
    SOCK_STREAM = 1,
    /// Datagram socket
    SOCK_DGRAM = 2,
    /// Raw socket
    SOCK_RAW = 3,
    /// Reliably-delivered message
    SOCK_RDM = 4,
    /// Sequential packet socket
    SOCK_SEQPACKET = 5,
}

impl TryFrom<i32> for SockType {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        let sock_type = match value {
            1 => Self::SOCK_STREAM,
            2 => Self::SOCK_DGRAM,
            3 => Self::SOCK_RAW,
            4 => Self::SOCK_RDM,
            5 => Self::SOCK_SEQPACKET,
            _ => return_errno_with_message!(Errno::EINVAL, "the socket type is invalid"),
        };

        Ok(sock_type)
    }
}

pub const SOCK_TYPE_MASK: i32 = 0xf;

bitflags! {
    /// Flags that can be or'ed into the type argument of `socket()`.
    pub struct SockFlags: i32 {
        const SOCK_NONBLOCK = 1 << 11;
        const SOCK_CLOEXEC = 1 << 19;
    }
}

bitflags! {
    /// The capabilities that a socket family reports to the generic socket layer.
    pub struct SockCaps: u32 {
        /// The socket can be switched to non-blocking mode.
        const NONBLOCKING = 1 << 0;
    }
}

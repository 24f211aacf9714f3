// SPDX-License-Identifier: MPL-2.0

use crate::prelude::*;

/// Address family.
///
/// Only the families that the socket layer knows about are listed.
/// See <https://elixir.bootlin.com/linux/v6.0.9/source/include/linux/socket.h>.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[expect(non_camel_case_types)]
pub enum CSocketAddrFamily {
    AF_UNSPEC = 0,
    /// Unix domain sockets
    AF_UNIX = 1,
    /// Internet IP Protocol
    AF_INET = 2,
    /// IP version 6,
    AF_INET6 = 10,
    AF_NETLINK = 16,
    // Alias to emulate 4.4BSD
    // AF_ROUTE = AF_NETLINK
    /// Packet family
    AF_PACKET = 17,
}

impl TryFrom<i32> for CSocketAddrFamily {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        let family = match value {
            0 => Self::AF_UNSPEC,
            1 => Self::AF_UNIX,
            2 => Self::AF_INET,
            10 => Self::AF_INET6,
            16 => Self::AF_NETLINK,
            17 => Self::AF_PACKET,
            _ => return_errno_with_message!(
                Errno::EAFNOSUPPORT,
                "the address family is not supported"
            ),
        };

        Ok(family)
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Netlink socket addresses.

mod multicast;

pub use multicast::GroupIdSet;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{net::socket::CSocketAddrFamily, prelude::*};

/// The socket address of a netlink socket.
///
/// The address contains the port number for unicast
/// and the group IDs for multicast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetlinkSocketAddr {
    port: PortNum,
    groups: GroupIdSet,
}

impl NetlinkSocketAddr {
    /// Creates a new netlink address.
    pub const fn new(port: PortNum, groups: GroupIdSet) -> Self {
        Self { port, groups }
    }

    /// Creates a new unspecified address.
    ///
    /// Both the port ID and group numbers are left unspecified.
    ///
    /// Note that an unspecified address can also represent the kernel socket address.
    pub const fn new_unspecified() -> Self {
        Self {
            port: UNSPECIFIED_PORT,
            groups: GroupIdSet::new_empty(),
        }
    }

    /// Returns the port number.
    pub const fn port(&self) -> PortNum {
        self.port
    }

    /// Returns the group ID set.
    pub const fn groups(&self) -> GroupIdSet {
        self.groups
    }

    /// Parses an address from the C `sockaddr_nl` in `buf`.
    pub fn read_from_buf(buf: &[u8]) -> Result<Self> {
        let Ok((c_addr, _)) = CSocketAddrNetlink::read_from_prefix(buf) else {
            return_errno_with_message!(Errno::EINVAL, "the netlink address is too short");
        };

        Self::try_from(c_addr)
    }

    /// Writes the address to `buf` as a C `sockaddr_nl`.
    ///
    /// The address is truncated if `buf` is too small. Returns the full
    /// length of the address.
    pub fn write_to_buf(&self, buf: &mut [u8]) -> usize {
        let c_addr = CSocketAddrNetlink::from(*self);
        let bytes = c_addr.as_bytes();

        let copy_len = bytes.len().min(buf.len());
        buf[..copy_len].copy_from_slice(&bytes[..copy_len]);

        bytes.len()
    }
}

/// Netlink socket address.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct CSocketAddrNetlink {
    /// Address family (AF_NETLINK).
    pub nl_family: u16,
    /// Pad bytes (always zero).
    pub nl_pad: u16,
    /// Port ID.
    pub nl_pid: u32,
    /// Multicast groups mask.
    pub nl_groups: u32,
}

impl From<NetlinkSocketAddr> for CSocketAddrNetlink {
    fn from(value: NetlinkSocketAddr) -> Self {
        Self {
            nl_family: CSocketAddrFamily::AF_NETLINK as _,
            nl_pad: 0,
            nl_pid: value.port(),
            nl_groups: value.groups().as_u32(),
        }
    }
}

impl TryFrom<CSocketAddrNetlink> for NetlinkSocketAddr {
    type Error = Error;

    fn try_from(value: CSocketAddrNetlink) -> Result<Self> {
        if value.nl_family != CSocketAddrFamily::AF_NETLINK as u16 {
            return_errno_with_message!(
                Errno::EAFNOSUPPORT,
                "the address is in an unsupported address family"
            );
        }

        let port = value.nl_pid;
        let groups = GroupIdSet::new(value.nl_groups);
        Ok(NetlinkSocketAddr::new(port, groups))
    }
}

pub type PortNum = u32;

pub const UNSPECIFIED_PORT: PortNum = 0;

/// The length of a C `sockaddr_nl`.
pub const NETLINK_ADDR_LEN: usize = size_of::<CSocketAddrNetlink>();

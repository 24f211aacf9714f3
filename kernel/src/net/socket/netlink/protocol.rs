// SPDX-License-Identifier: MPL-2.0

use crate::prelude::*;

/// Netlink protocols.
///
/// See <https://elixir.bootlin.com/linux/v6.0.9/source/include/uapi/linux/netlink.h>.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[expect(non_camel_case_types)]
pub enum NetlinkProtocol {
    /// Routing/device hook
    NETLINK_ROUTE = 0,
    /// Reserved for user mode socket protocols
    NETLINK_USERSOCK = 2,
    /// Unused number, formerly ip_queue
    NETLINK_FIREWALL = 3,
    /// Socket monitoring
    NETLINK_SOCK_DIAG = 4,
    /// netfilter/iptables ULOG
    NETLINK_NFLOG = 5,
    /// ipsec
    NETLINK_XFRM = 6,
    /// SELinux event notifications
    NETLINK_SELINUX = 7,
    /// Open-iSCSI
    NETLINK_ISCSI = 8,
    /// auditing
    NETLINK_AUDIT = 9,
    NETLINK_FIB_LOOKUP = 10,
    NETLINK_CONNECTOR = 11,
    /// netfilter subsystem
    NETLINK_NETFILTER = 12,
    NETLINK_IP6_FW = 13,
    /// DECnet routing messages
    NETLINK_DNRTMSG = 14,
    /// Kernel messages to userspace
    NETLINK_KOBJECT_UEVENT = 15,
    NETLINK_GENERIC = 16,
}

impl TryFrom<i32> for NetlinkProtocol {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        let protocol = match value {
            0 => Self::NETLINK_ROUTE,
            2 => Self::NETLINK_USERSOCK,
            3 => Self::NETLINK_FIREWALL,
            4 => Self::NETLINK_SOCK_DIAG,
            5 => Self::NETLINK_NFLOG,
            6 => Self::NETLINK_XFRM,
            7 => Self::NETLINK_SELINUX,
            8 => Self::NETLINK_ISCSI,
            9 => Self::NETLINK_AUDIT,
            10 => Self::NETLINK_FIB_LOOKUP,
            11 => Self::NETLINK_CONNECTOR,
            12 => Self::NETLINK_NETFILTER,
            13 => Self::NETLINK_IP6_FW,
            14 => Self::NETLINK_DNRTMSG,
            15 => Self::NETLINK_KOBJECT_UEVENT,
            16 => Self::NETLINK_GENERIC,
            _ => return_errno_with_message!(
                Errno::EPROTONOSUPPORT,
                "the netlink protocol is unknown"
            ),
        };

        Ok(protocol)
    }
}

impl NetlinkProtocol {
    /// Returns whether the protocol is compiled into this build.
    pub const fn is_compiled_in(&self) -> bool {
        matches!(self, Self::NETLINK_ROUTE) && cfg!(feature = "route")
    }
}

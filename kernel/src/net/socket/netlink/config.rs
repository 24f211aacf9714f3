// SPDX-License-Identifier: MPL-2.0

/// Run-time sizing of the netlink socket family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetlinkConfig {
    /// The maximum number of live connections.
    pub max_conns: usize,
    /// The maximum number of pending response notifications.
    pub max_notifications: usize,
}

impl NetlinkConfig {
    pub const DEFAULT_MAX_CONNS: usize = 8;
    pub const DEFAULT_MAX_NOTIFICATIONS: usize = 16;
}

impl Default for NetlinkConfig {
    fn default() -> Self {
        Self {
            max_conns: Self::DEFAULT_MAX_CONNS,
            max_notifications: Self::DEFAULT_MAX_NOTIFICATIONS,
        }
    }
}

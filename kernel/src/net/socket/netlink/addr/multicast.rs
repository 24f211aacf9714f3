// SPDX-License-Identifier: MPL-2.0

/// A set of multicast group IDs, stored as the `nl_groups` bitmask.
///
/// The socket layer only records the set and reports it back; group
/// membership is left to the sub-protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupIdSet(u32);

impl GroupIdSet {
    /// Creates a set from a group bitmask.
    pub const fn new(groups: u32) -> Self {
        Self(groups)
    }

    /// Creates an empty set.
    pub const fn new_empty() -> Self {
        Self(0)
    }

    /// Returns the group bitmask.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Netlink connections.
//!
//! A connection is shared by every socket handle duplicated from the one
//! that created it. Handles own it through an explicit reference count, and
//! the connection is released when the count drops from one to zero.

use super::{
    addr::NetlinkSocketAddr, notifier::ResponseNotifier, poll::PollState,
    protocol::NetlinkProtocol, receiver::ResponseEntry,
};
use crate::prelude::*;

/// The identity of a connection, used as the subject of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConnId(u32);

impl ConnId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// The shared state of a netlink socket.
pub struct NetlinkConn {
    id: ConnId,
    protocol: NetlinkProtocol,
    pub(super) inner: Mutex<ConnInner>,
    pub(super) notifier: Arc<ResponseNotifier>,
}

pub(super) struct ConnInner {
    pub(super) local: NetlinkSocketAddr,
    pub(super) peer: NetlinkSocketAddr,
    /// The number of socket handles that reference the connection.
    pub(super) crefs: u8,
    pub(super) poll: PollState,
    pub(super) responses: VecDeque<ResponseEntry>,
}

impl NetlinkConn {
    fn new(id: ConnId, protocol: NetlinkProtocol, notifier: Arc<ResponseNotifier>) -> Self {
        Self {
            id,
            protocol,
            inner: Mutex::new(ConnInner {
                local: NetlinkSocketAddr::new_unspecified(),
                peer: NetlinkSocketAddr::new_unspecified(),
                crefs: 1,
                poll: PollState::Idle,
                responses: VecDeque::new(),
            }),
            notifier,
        }
    }

    pub fn id(&self) -> ConnId {
        self.id
    }

    pub fn protocol(&self) -> NetlinkProtocol {
        self.protocol
    }

    pub fn local_addr(&self) -> NetlinkSocketAddr {
        self.inner.lock().local
    }

    pub fn peer_addr(&self) -> NetlinkSocketAddr {
        self.inner.lock().peer
    }

    pub(super) fn set_local_addr(&self, addr: NetlinkSocketAddr) {
        self.inner.lock().local = addr;
    }

    pub(super) fn set_peer_addr(&self, addr: NetlinkSocketAddr) {
        self.inner.lock().peer = addr;
    }

    /// Returns the number of socket handles that reference the connection.
    pub fn crefs(&self) -> u8 {
        self.inner.lock().crefs
    }

    /// Adds a reference for a duplicated socket handle.
    ///
    /// # Panics
    ///
    /// Panics if the connection is already released or the count is at its
    /// maximum. Both mean that some handle has lost track of its ownership.
    pub fn add_ref(&self) {
        let mut inner = self.inner.lock();
        assert!(
            inner.crefs > 0 && inner.crefs < u8::MAX,
            "invalid reference count {} on netlink connection {:?}",
            inner.crefs,
            self.id
        );
        inner.crefs += 1;
    }

    /// Drops the reference of a closed socket handle.
    ///
    /// Returns `true` if this was the last reference. The connection is then
    /// reset: an armed poll is cancelled and queued responses are discarded.
    pub(super) fn release_ref(&self) -> bool {
        let mut inner = self.inner.lock();
        assert!(
            inner.crefs > 0,
            "netlink connection {:?} is released twice",
            self.id
        );

        inner.crefs -= 1;
        if inner.crefs > 0 {
            return false;
        }

        if let PollState::Armed(registration) = core::mem::take(&mut inner.poll) {
            error!(
                "netlink connection {:?} is closed with an armed poll",
                self.id
            );
            self.notifier.teardown(registration.key());
        }
        inner.responses.clear();

        true
    }
}

impl Debug for NetlinkConn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NetlinkConn")
            .field("id", &self.id)
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

/// The allocator of netlink connections.
///
/// The pool bounds the number of live connections.
pub(super) struct ConnPool {
    max_conns: usize,
    state: Mutex<PoolState>,
}

struct PoolState {
    live: BTreeSet<ConnId>,
    next_id: u32,
}

impl ConnPool {
    pub(super) const fn new(max_conns: usize) -> Self {
        Self {
            max_conns,
            state: Mutex::new(PoolState {
                live: BTreeSet::new(),
                next_id: 1,
            }),
        }
    }

    /// Allocates a connection with one reference.
    ///
    /// Returns `None` if the pool is exhausted.
    pub(super) fn alloc(
        &self,
        protocol: NetlinkProtocol,
        notifier: &Arc<ResponseNotifier>,
    ) -> Option<Arc<NetlinkConn>> {
        let mut state = self.state.lock();
        if state.live.len() >= self.max_conns {
            return None;
        }

        // IDs wrap around; skip zero and those still held by live connections.
        let id = loop {
            let id = ConnId::new(state.next_id);
            state.next_id = state.next_id.wrapping_add(1).max(1);
            if state.live.insert(id) {
                break id;
            }
        };

        Some(Arc::new(NetlinkConn::new(id, protocol, notifier.clone())))
    }

    /// Returns a released connection to the pool.
    pub(super) fn free(&self, conn: Arc<NetlinkConn>) {
        debug_assert_eq!(conn.crefs(), 0);
        debug!("netlink connection {:?} is freed", conn.id());

        let removed = self.state.lock().live.remove(&conn.id());
        debug_assert!(removed);
    }

    pub(super) fn num_live(&self) -> usize {
        self.state.lock().live.len()
    }
}

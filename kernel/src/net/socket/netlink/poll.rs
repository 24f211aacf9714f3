// SPDX-License-Identifier: MPL-2.0

//! The poll coordinator of a connection.
//!
//! At most one poll for readability can be armed on a connection. Arming
//! records the poller's semaphore and event slot and registers a response
//! notification; the notification reports `IN`, posts the semaphore once
//! and disarms the connection.

use super::{conn::NetlinkConn, notifier::NotifierKey};
use crate::{
    events::{IoEvents, PollEvents},
    net::socket::PollFd,
    prelude::*,
    sync::Semaphore,
};

#[derive(Debug, Default)]
pub(super) enum PollState {
    #[default]
    Idle,
    Armed(ReadinessRegistration),
}

impl PollState {
    pub(super) fn is_armed(&self) -> bool {
        matches!(self, Self::Armed(_))
    }
}

/// An armed poll.
#[derive(Debug)]
pub(super) struct ReadinessRegistration {
    sem: Arc<Semaphore>,
    revents: Arc<PollEvents>,
    key: NotifierKey,
}

impl ReadinessRegistration {
    pub(super) fn key(&self) -> NotifierKey {
        self.key
    }
}

impl NetlinkConn {
    /// Sets up a poll.
    ///
    /// If some requested events are ready, they are reported at once.
    /// Otherwise, if `IN` is requested, the connection is armed to report it
    /// when a response arrives.
    pub(super) fn poll_setup(self: &Arc<Self>, fds: &PollFd) -> Result<()> {
        let mut inner = self.inner.lock();

        let mut revents = IoEvents::OUT;
        if !inner.responses.is_empty() {
            revents |= IoEvents::IN;
        }

        let revents = revents & fds.events();
        if !revents.is_empty() {
            fds.revents_slot().set(revents);
            fds.sem().post();
            return Ok(());
        }

        if !fds.events().contains(IoEvents::IN) {
            return Ok(());
        }

        if inner.poll.is_armed() {
            error!("multiple polls on netlink connection {:?}", self.id());
            return_errno_with_message!(Errno::EBUSY, "a poll is already armed on the socket");
        }

        let conn = Arc::downgrade(self);
        let key = self
            .notifier
            .setup(self.id(), move |key| {
                if let Some(conn) = conn.upgrade() {
                    conn.response_available(key);
                }
            })
            .inspect_err(|err| error!("failed to set up the response notification: {}", err))?;

        inner.poll = PollState::Armed(ReadinessRegistration {
            sem: fds.sem().clone(),
            revents: fds.revents_slot().clone(),
            key,
        });

        Ok(())
    }

    /// Tears down a poll. Does nothing if no poll is armed.
    pub(super) fn poll_teardown(&self) {
        let mut inner = self.inner.lock();
        if let PollState::Armed(registration) = core::mem::take(&mut inner.poll) {
            self.notifier.teardown(registration.key);
        }
    }

    /// Returns whether a poll is armed.
    pub fn is_poll_armed(&self) -> bool {
        self.inner.lock().poll.is_armed()
    }

    fn response_available(&self, key: NotifierKey) {
        let mut inner = self.inner.lock();

        let registration = match core::mem::take(&mut inner.poll) {
            PollState::Armed(registration) if registration.key == key => registration,
            other => {
                inner.poll = other;
                warn!(
                    "stale response notification {} on netlink connection {:?}",
                    key,
                    self.id()
                );
                return;
            }
        };

        registration.revents.insert(IoEvents::IN);
        registration.sem.post();
    }
}

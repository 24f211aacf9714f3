// SPDX-License-Identifier: MPL-2.0

//! The response queue of a connection.

use super::conn::NetlinkConn;
use crate::{prelude::*, sync::Semaphore};

/// A message queued for a receive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry {
    message: Vec<u8>,
}

impl ResponseEntry {
    pub fn new(message: Vec<u8>) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }
}

impl NetlinkConn {
    /// Queues a response and notifies the waiters of the connection.
    pub fn add_response(&self, message: Vec<u8>) {
        let mut inner = self.inner.lock();
        inner.responses.push_back(ResponseEntry::new(message));
        self.notifier.signal(self.id());
    }

    /// Returns whether a response is queued.
    pub fn check_response(&self) -> bool {
        !self.inner.lock().responses.is_empty()
    }

    /// Takes the oldest response, if any.
    pub fn tryget_response(&self) -> Option<ResponseEntry> {
        self.inner.lock().responses.pop_front()
    }

    /// Takes the oldest response, waiting until one is queued.
    ///
    /// Returns `None` only if no notification can be set up for the wait.
    pub fn get_response(&self) -> Option<ResponseEntry> {
        loop {
            let sem = Arc::new(Semaphore::new(0));

            let key = {
                let mut inner = self.inner.lock();
                if let Some(entry) = inner.responses.pop_front() {
                    return Some(entry);
                }

                let sem = sem.clone();
                match self.notifier.setup(self.id(), move |_| sem.post()) {
                    Ok(key) => key,
                    Err(err) => {
                        error!("failed to wait for a netlink response: {}", err);
                        return None;
                    }
                }
            };

            sem.wait();
            self.notifier.teardown(key);
        }
    }
}

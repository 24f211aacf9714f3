// SPDX-License-Identifier: MPL-2.0

//! One-shot notifications of response arrival.
//!
//! A registration names a subject (a connection) and a worker. When a
//! response is queued on the subject, every registration for it is removed
//! and its worker is submitted to the work queue, so each registration fires
//! at most once and never in the context of the producer.

use super::conn::ConnId;
use crate::{prelude::*, thread::work_queue::WorkQueue};

/// The key that identifies one registration.
///
/// Keys are never reused, so a worker can tell whether the registration it
/// was set up for is still the one that its owner is waiting on.
pub type NotifierKey = u64;

type NotifierWorker = Box<dyn FnOnce(NotifierKey) + Send>;

struct Registration {
    subject: ConnId,
    worker: NotifierWorker,
}

struct RegistrationTable {
    next_key: NotifierKey,
    registrations: BTreeMap<NotifierKey, Registration>,
}

pub struct ResponseNotifier {
    max_registrations: usize,
    table: Mutex<RegistrationTable>,
    work_queue: Arc<WorkQueue>,
}

impl ResponseNotifier {
    pub fn new(max_registrations: usize, work_queue: Arc<WorkQueue>) -> Self {
        Self {
            max_registrations,
            table: Mutex::new(RegistrationTable {
                next_key: 1,
                registrations: BTreeMap::new(),
            }),
            work_queue,
        }
    }

    /// Registers `worker` to be called once a response is queued on `subject`.
    pub fn setup<F>(&self, subject: ConnId, worker: F) -> Result<NotifierKey>
    where
        F: FnOnce(NotifierKey) + Send + 'static,
    {
        let mut table = self.table.lock();
        if table.registrations.len() >= self.max_registrations {
            return_errno_with_message!(Errno::ENOMEM, "no notification slot is available");
        }

        let key = table.next_key;
        table.next_key += 1;
        table.registrations.insert(
            key,
            Registration {
                subject,
                worker: Box::new(worker),
            },
        );

        Ok(key)
    }

    /// Cancels a registration.
    ///
    /// Returns whether the registration was still pending. Cancelling a
    /// registration that has fired or has been cancelled is a no-op.
    pub fn teardown(&self, key: NotifierKey) -> bool {
        self.table.lock().registrations.remove(&key).is_some()
    }

    /// Fires every registration for `subject`.
    ///
    /// Returns the number of workers submitted to the work queue.
    pub fn signal(&self, subject: ConnId) -> usize {
        let mut table = self.table.lock();

        let keys: Vec<NotifierKey> = table
            .registrations
            .iter()
            .filter(|(_, registration)| registration.subject == subject)
            .map(|(key, _)| *key)
            .collect();

        for key in keys.iter() {
            let Some(registration) = table.registrations.remove(key) else {
                continue;
            };
            let key = *key;
            let worker = registration.worker;
            self.work_queue.submit_func(move || worker(key));
        }

        keys.len()
    }

    /// Returns the number of pending registrations.
    pub fn num_registrations(&self) -> usize {
        self.table.lock().registrations.len()
    }
}

impl Debug for ResponseNotifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResponseNotifier")
            .field("max_registrations", &self.max_registrations)
            .field("num_registrations", &self.num_registrations())
            .finish_non_exhaustive()
    }
}

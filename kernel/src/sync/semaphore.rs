// SPDX-License-Identifier: MPL-2.0

use core::sync::atomic::{AtomicUsize, Ordering};

/// A counting semaphore.
///
/// This is the wait signal carried by a poll descriptor: the polled object
/// posts it once per wake-up, and the polling thread waits on it. Posting
/// never blocks, so it can be done from a deferred-work context.
#[derive(Debug, Default)]
pub struct Semaphore {
    count: AtomicUsize,
}

impl Semaphore {
    /// Creates a semaphore with `count` initial permits.
    pub const fn new(count: usize) -> Self {
        Self {
            count: AtomicUsize::new(count),
        }
    }

    /// Releases one permit.
    pub fn post(&self) {
        self.count.fetch_add(1, Ordering::Release);
    }

    /// Takes one permit if there is any.
    pub fn try_wait(&self) -> bool {
        self.count
            .fetch_update(Ordering::Acquire, Ordering::Relaxed, |count| {
                count.checked_sub(1)
            })
            .is_ok()
    }

    /// Takes one permit, waiting until one is posted.
    pub fn wait(&self) {
        while !self.try_wait() {
            core::hint::spin_loop();
        }
    }

    /// Returns the number of available permits.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod test {
    use alloc::sync::Arc;

    use super::*;

    #[test]
    fn post_then_wait() {
        let sem = Semaphore::new(0);
        assert!(!sem.try_wait());

        sem.post();
        sem.post();
        assert_eq!(sem.count(), 2);

        sem.wait();
        assert!(sem.try_wait());
        assert!(!sem.try_wait());
        assert_eq!(sem.count(), 0);
    }

    #[test]
    fn wait_for_other_thread() {
        let sem = Arc::new(Semaphore::new(0));

        let poster = {
            let sem = sem.clone();
            std::thread::spawn(move || sem.post())
        };

        sem.wait();
        poster.join().unwrap();
        assert_eq!(sem.count(), 0);
    }
}

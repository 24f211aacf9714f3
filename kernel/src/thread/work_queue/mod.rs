// SPDX-License-Identifier: MPL-2.0

//! Work queue mechanism.
//!
//! # Overview
//!
//! A work queue holds deferred work: callbacks that must not run in the
//! context that produced them (for example, while the producer still holds a
//! connection lock). The embedding kernel runs the pending items from a
//! worker thread by calling [`WorkQueue::run_pending`].
//!
//! # Examples
//!
//! ```rust
//! use netlink_sockif::thread::work_queue::WorkQueue;
//!
//! let queue = WorkQueue::new();
//! queue.submit_func(|| { /* deferred task */ });
//! assert_eq!(queue.run_pending(), 1);
//! ```

pub use self::work_item::WorkItem;
use crate::prelude::*;

mod work_item;

/// A work queue maintains a series of work items to be handled
/// asynchronously in a process context.
#[derive(Debug, Default)]
pub struct WorkQueue {
    pending_work_items: Mutex<VecDeque<WorkItem>>,
}

impl WorkQueue {
    pub const fn new() -> Self {
        Self {
            pending_work_items: Mutex::new(VecDeque::new()),
        }
    }

    /// Submits a work item.
    pub fn submit(&self, work_item: WorkItem) {
        self.pending_work_items.lock().push_back(work_item);
    }

    /// Submits a function as a work item.
    pub fn submit_func<F>(&self, work_func: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(WorkItem::new(Box::new(work_func)));
    }

    /// Runs the work items in submission order until the queue is empty.
    ///
    /// Items are called without the queue lock held, so an item may submit
    /// new work. Returns the number of items that have been run.
    pub fn run_pending(&self) -> usize {
        let mut num_run = 0;

        loop {
            let Some(work_item) = self.pending_work_items.lock().pop_front() else {
                return num_run;
            };
            work_item.call_work_func();
            num_run += 1;
        }
    }

    /// Returns whether some work items are waiting to be run.
    pub fn has_pending(&self) -> bool {
        !self.pending_work_items.lock().is_empty()
    }
}

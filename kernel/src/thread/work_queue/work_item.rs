// SPDX-License-Identifier: MPL-2.0

use crate::prelude::*;

/// A one-shot task to be executed by a worker.
pub struct WorkItem {
    work_func: Box<dyn FnOnce() + Send>,
}

impl WorkItem {
    pub fn new(work_func: Box<dyn FnOnce() + Send>) -> Self {
        Self { work_func }
    }

    pub(super) fn call_work_func(self) {
        (self.work_func)()
    }
}

impl Debug for WorkItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorkItem").finish_non_exhaustive()
    }
}

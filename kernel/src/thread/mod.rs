// SPDX-License-Identifier: MPL-2.0

//! Deferred execution.

pub mod work_queue;

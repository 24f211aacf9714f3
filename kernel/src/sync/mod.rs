// SPDX-License-Identifier: MPL-2.0

//! Synchronization primitives used by the socket layer.

mod semaphore;

pub use self::semaphore::Semaphore;

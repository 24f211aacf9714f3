// SPDX-License-Identifier: MPL-2.0

//! The calling-process context handed to socket operations.

/// Process ID.
pub type Pid = u32;

/// The context of the process that issues a socket call.
///
/// The generic socket layer builds one per system call. Socket families only
/// read the identity of the caller from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pid: Pid,
}

impl Context {
    /// Creates the context of the process `pid`.
    pub const fn new(pid: Pid) -> Self {
        Self { pid }
    }

    /// Returns the process ID of the caller.
    pub const fn pid(&self) -> Pid {
        self.pid
    }
}

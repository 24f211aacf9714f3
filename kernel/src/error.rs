// SPDX-License-Identifier: MPL-2.0

/// Error number.
///
/// Only the numbers that the socket layer can produce are listed. The values
/// follow the Linux numbering so that they can be handed to user space as-is.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Errno {
    EBADF = 9,   /* Bad file number */
    EAGAIN = 11, /* Try again */
    ENOMEM = 12, /* Out of memory */
    EBUSY = 16,  /* Device or resource busy */
    EINVAL = 22, /* Invalid argument */
    EPIPE = 32,  /* Broken pipe */

    EPROTONOSUPPORT = 93, /* Protocol not supported */
    EOPNOTSUPP = 95,      /* Operation not supported on transport endpoint */
    EAFNOSUPPORT = 97,    /* Address family not supported by protocol */
}

/// error used in this crate
#[derive(Debug, Clone, Copy)]
pub struct Error {
    errno: Errno,
    msg: Option<&'static str>,
}

impl Error {
    pub const fn new(errno: Errno) -> Self {
        Error { errno, msg: None }
    }

    pub const fn with_message(errno: Errno, msg: &'static str) -> Self {
        Error {
            errno,
            msg: Some(msg),
        }
    }

    pub const fn error(&self) -> Errno {
        self.errno
    }

    pub const fn message(&self) -> Option<&'static str> {
        self.msg
    }
}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::new(errno)
    }
}

impl AsRef<Error> for Error {
    fn as_ref(&self) -> &Error {
        self
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.msg {
            Some(msg) => write!(f, "{:?}: {}", self.errno, msg),
            None => write!(f, "{:?}", self.errno),
        }
    }
}

#[macro_export]
macro_rules! return_errno {
    ($errno: expr) => {
        return Err($crate::error::Error::new($errno))
    };
}

#[macro_export]
macro_rules! return_errno_with_message {
    ($errno: expr, $message: expr) => {
        return Err($crate::error::Error::with_message($errno, $message))
    };
}

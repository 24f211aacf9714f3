// SPDX-License-Identifier: MPL-2.0

#![allow(unused)]

pub(crate) use alloc::{
    boxed::Box,
    collections::{BTreeMap, BTreeSet, VecDeque},
    sync::{Arc, Weak},
    vec,
    vec::Vec,
};
pub(crate) use core::{any::Any, fmt::Debug};

pub(crate) use bitflags::bitflags;
pub(crate) use log::{debug, error, info, trace, warn};
pub(crate) use spin::{Mutex, MutexGuard};

pub(crate) use crate::{
    error::{Errno, Error},
    process::{Context, Pid},
};
pub(crate) type Result<T> = core::result::Result<T, Error>;
pub(crate) use crate::{return_errno, return_errno_with_message};

// SPDX-License-Identifier: MPL-2.0

pub mod family;
pub mod send_recv_flags;
pub mod sock_type;

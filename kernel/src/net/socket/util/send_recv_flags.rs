// SPDX-License-Identifier: MPL-2.0

use crate::prelude::*;

bitflags! {
    /// Flags used for send/recv.
    /// The definition is from https://elixir.bootlin.com/linux/v6.0.9/source/include/linux/socket.h
    pub struct SendRecvFlags: i32 {
        const MSG_OOB = 1;
        const MSG_PEEK	= 2;
        const MSG_DONTROUTE	= 4;
        const MSG_CTRUNC	= 8;
        const MSG_PROBE	= 0x10;	/* Do not send. Only probe path f.e. for MTU */
        const MSG_TRUNC	= 0x20;
        const MSG_DONTWAIT	= 0x40;	/* Nonblocking io		 */
        const MSG_EOR       = 0x80;	/* End of record */
        const MSG_WAITALL	= 0x100;	/* Wait for a full request */
        const MSG_CONFIRM	= 0x800;	/* Confirm path validity */
        const MSG_ERRQUEUE	= 0x2000;	/* Fetch message from error queue */
        const MSG_NOSIGNAL	= 0x4000;	/* Do not generate SIGPIPE */
        const MSG_MORE	= 0x8000;	/* Sender will send more */
    }
}

impl SendRecvFlags {
    /// Returns whether the flags ask a receive call not to wait.
    pub fn is_dontwait(&self) -> bool {
        self.contains(SendRecvFlags::MSG_DONTWAIT)
    }
}

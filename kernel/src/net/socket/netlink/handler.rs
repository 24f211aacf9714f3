// SPDX-License-Identifier: MPL-2.0

use super::{addr::NetlinkSocketAddr, conn::NetlinkConn};
use crate::{net::socket::SendRecvFlags, prelude::*};

/// The sender of a netlink sub-protocol.
///
/// The socket family validates the framing and the destination, then hands
/// the message to the handler of the connection's protocol. Replies are
/// queued on `conn` with [`NetlinkConn::add_response`].
pub trait PayloadHandler: Send + Sync {
    /// Handles the message in `message`, sent to `dest`.
    ///
    /// Returns the number of bytes consumed.
    fn handle_send(
        &self,
        conn: &Arc<NetlinkConn>,
        message: &[u8],
        flags: SendRecvFlags,
        dest: &NetlinkSocketAddr,
    ) -> Result<usize>;
}

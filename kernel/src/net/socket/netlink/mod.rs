// SPDX-License-Identifier: MPL-2.0

//! Netlink sockets.
//!
//! Netlink sockets let user programs exchange management messages with the
//! kernel. The family is connectionless: a socket is set up with a
//! sub-protocol, optionally bound to a local port and connected to a default
//! peer, and then sends requests that the sub-protocol's [`PayloadHandler`]
//! answers by queueing responses on the socket's connection.
//!
//! Readers learn about queued responses through polls or blocking receive
//! calls. Both register one-shot notifications whose callbacks run from the
//! family's work queue, see [`NetlinkSockIntf::work_queue`].

mod addr;
mod config;
mod conn;
mod handler;
mod message;
mod notifier;
mod poll;
mod protocol;
mod receiver;
#[cfg(feature = "route")]
mod route;
mod sockif;

pub use self::{
    addr::{
        CSocketAddrNetlink, GroupIdSet, NETLINK_ADDR_LEN, NetlinkSocketAddr, PortNum,
        UNSPECIFIED_PORT,
    },
    config::NetlinkConfig,
    conn::{ConnId, NetlinkConn},
    handler::PayloadHandler,
    message::{
        CMsgSegErr, CMsgSegHdr, CSegmentType, NLMSG_ALIGN, SegHdrCommonFlags, done_segment,
        error_segment,
    },
    notifier::{NotifierKey, ResponseNotifier},
    protocol::NetlinkProtocol,
    receiver::ResponseEntry,
    sockif::NetlinkSockIntf,
};
#[cfg(feature = "route")]
pub use self::route::RouteHandler;

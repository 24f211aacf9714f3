// SPDX-License-Identifier: MPL-2.0

//! This test checks that a build without any netlink sub-protocol refuses
//! to set up netlink sockets.

#![cfg(not(feature = "route"))]

use std::sync::Arc;

use netlink_sockif::{
    Errno,
    net::socket::{
        CSocketAddrFamily, SockType, SocketFamilies,
        netlink::{NetlinkProtocol, NetlinkSockIntf},
    },
};

#[test]
fn route_socket_is_refused() {
    let sockif = Arc::new(NetlinkSockIntf::default());
    let mut families = SocketFamilies::new();
    families.register(CSocketAddrFamily::AF_NETLINK, sockif.clone());

    let err = families
        .socket(
            CSocketAddrFamily::AF_NETLINK as i32,
            SockType::SOCK_RAW as i32,
            NetlinkProtocol::NETLINK_ROUTE as i32,
        )
        .unwrap_err();
    assert_eq!(err.error(), Errno::EPROTONOSUPPORT);
    assert_eq!(sockif.num_conns(), 0);
}

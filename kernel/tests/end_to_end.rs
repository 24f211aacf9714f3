// SPDX-License-Identifier: MPL-2.0

//! This test drives a netlink socket through its whole life using only the
//! public socket API: setup, bind, connect, send, a produced reply and the
//! receive calls around it.

#![cfg(feature = "route")]

use std::sync::{Arc, Mutex};

use netlink_sockif::{
    Errno, Result,
    events::IoEvents,
    net::socket::{
        CSocketAddrFamily, SendRecvFlags, SockType, SocketFamilies,
        netlink::{
            CMsgSegHdr, CSegmentType, GroupIdSet, NETLINK_ADDR_LEN, NetlinkConfig, NetlinkConn,
            NetlinkProtocol, NetlinkSockIntf, NetlinkSocketAddr, PayloadHandler,
            SegHdrCommonFlags,
        },
    },
    process::Context,
};
use zerocopy::{FromBytes, IntoBytes};

const AF_NETLINK: i32 = CSocketAddrFamily::AF_NETLINK as i32;
const SOCK_RAW: i32 = SockType::SOCK_RAW as i32;
const NETLINK_ROUTE: i32 = NetlinkProtocol::NETLINK_ROUTE as i32;

/// A handler that records what it is asked to send.
#[derive(Default)]
struct RecordingHandler {
    sent: Mutex<Vec<(Vec<u8>, NetlinkSocketAddr)>>,
}

impl PayloadHandler for RecordingHandler {
    fn handle_send(
        &self,
        _conn: &Arc<NetlinkConn>,
        message: &[u8],
        _flags: SendRecvFlags,
        dest: &NetlinkSocketAddr,
    ) -> Result<usize> {
        self.sent.lock().unwrap().push((message.to_vec(), *dest));
        Ok(message.len())
    }
}

fn addr_bytes(port: u32, groups: u32) -> [u8; NETLINK_ADDR_LEN] {
    let mut buf = [0u8; NETLINK_ADDR_LEN];
    NetlinkSocketAddr::new(port, GroupIdSet::new(groups)).write_to_buf(&mut buf);
    buf
}

fn message(type_: u16, flags: SegHdrCommonFlags, payload: &[u8]) -> Vec<u8> {
    let header = CMsgSegHdr {
        len: (CMsgSegHdr::LEN + payload.len()) as u32,
        type_,
        flags: flags.bits(),
        seq: 1,
        pid: 0,
    };

    let mut message = header.as_bytes().to_vec();
    message.extend_from_slice(payload);
    message
}

#[test]
fn send_and_receive() {
    let handler = Arc::new(RecordingHandler::default());
    let sockif = Arc::new(
        NetlinkSockIntf::new(NetlinkConfig::default())
            .with_handler(NetlinkProtocol::NETLINK_ROUTE, handler.clone()),
    );
    let mut families = SocketFamilies::new();
    families.register(CSocketAddrFamily::AF_NETLINK, sockif.clone());

    let socket = families
        .socket(AF_NETLINK, SOCK_RAW, NETLINK_ROUTE)
        .unwrap();
    socket.bind(&addr_bytes(0, 0x1), &Context::new(100)).unwrap();
    socket.connect(&addr_bytes(7, 0)).unwrap();

    let mut name = [0u8; NETLINK_ADDR_LEN];
    socket.getsockname(&mut name).unwrap();
    assert_eq!(name, addr_bytes(100, 0x1));

    let request = message(
        CSegmentType::GETLINK as u16,
        SegHdrCommonFlags::REQUEST,
        &[0xaa; 4],
    );
    let sent = socket.send(&request, SendRecvFlags::empty()).unwrap();
    assert_eq!(sent, request.len());
    {
        let records = handler.sent.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, request);
        assert_eq!(records[0].1, NetlinkSocketAddr::new(7, GroupIdSet::new(0)));
    }

    let mut buf = [0u8; 64];
    let err = socket
        .recvfrom(&mut buf, SendRecvFlags::MSG_DONTWAIT, None)
        .unwrap_err();
    assert_eq!(err.error(), Errno::EAGAIN);

    let reply = message(CSegmentType::NEWLINK as u16, SegHdrCommonFlags::empty(), &[1; 8]);
    let conn = socket.conn_as::<NetlinkConn>().unwrap();
    conn.add_response(reply.clone());

    let mut from = [0u8; NETLINK_ADDR_LEN];
    let (len, from_len) = socket
        .recvfrom(&mut buf, SendRecvFlags::MSG_DONTWAIT, Some(&mut from))
        .unwrap();
    assert_eq!(&buf[..len], reply.as_slice());
    assert_eq!(from_len, Some(NETLINK_ADDR_LEN));
    assert_eq!(from, addr_bytes(7, 0));

    socket.close().unwrap();
    assert_eq!(sockif.num_conns(), 0);
}

#[test]
fn route_dump_is_answered() {
    let sockif = Arc::new(NetlinkSockIntf::default());
    let mut families = SocketFamilies::new();
    families.register(CSocketAddrFamily::AF_NETLINK, sockif.clone());

    let socket = families
        .socket(AF_NETLINK, SockType::SOCK_DGRAM as i32, NETLINK_ROUTE)
        .unwrap();
    socket.bind(&addr_bytes(0, 0), &Context::new(55)).unwrap();

    let producer = {
        let sockif = sockif.clone();
        std::thread::spawn(move || {
            while sockif.work_queue().run_pending() == 0 {
                std::thread::yield_now();
            }
        })
    };

    let dump = message(
        CSegmentType::GETROUTE as u16,
        SegHdrCommonFlags::REQUEST | SegHdrCommonFlags::DUMP,
        &[0; 4],
    );
    let to = addr_bytes(0, 0);
    assert_eq!(
        socket.sendto(&dump, SendRecvFlags::empty(), &to).unwrap(),
        dump.len()
    );

    // The reply is queued before the poll, so no notification is involved.
    assert_eq!(socket.poll(IoEvents::IN).unwrap(), IoEvents::IN);

    let mut buf = [0u8; 64];
    let (len, _) = socket.recvfrom(&mut buf, SendRecvFlags::empty(), None).unwrap();
    let (header, _) = CMsgSegHdr::read_from_prefix(&buf[..len]).unwrap();
    assert_eq!(header.type_, CSegmentType::DONE as u16);
    assert_eq!(header.pid, 55);
    assert_eq!(header.seq, 1);

    let waiter = {
        let socket = socket.dup().unwrap();
        std::thread::spawn(move || {
            let mut buf = [0u8; 64];
            let (len, _) = socket.recvfrom(&mut buf, SendRecvFlags::empty(), None).unwrap();
            let (header, _) = CMsgSegHdr::read_from_prefix(&buf[..len]).unwrap();
            header.type_
        })
    };

    while sockif.num_notifications() == 0 {
        std::thread::yield_now();
    }
    let unknown = message(CSegmentType::NEWROUTE as u16, SegHdrCommonFlags::REQUEST, &[]);
    socket.sendto(&unknown, SendRecvFlags::empty(), &to).unwrap();

    assert_eq!(waiter.join().unwrap(), CSegmentType::ERROR as u16);
    producer.join().unwrap();

    socket.close().unwrap();
    assert_eq!(sockif.num_conns(), 0);
}

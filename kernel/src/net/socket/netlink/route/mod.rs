// SPDX-License-Identifier: MPL-2.0

//! The default `NETLINK_ROUTE` handler.
//!
//! The socket layer owns no link, address or route tables, so a dump request
//! gets an empty dump and any other request is refused.

use super::{
    addr::NetlinkSocketAddr,
    conn::NetlinkConn,
    handler::PayloadHandler,
    message::{CMsgSegHdr, CSegmentType, SegHdrCommonFlags, done_segment, error_segment},
};
use crate::{net::socket::SendRecvFlags, prelude::*};

#[derive(Debug, Default)]
pub struct RouteHandler;

impl RouteHandler {
    pub const fn new() -> Self {
        Self
    }
}

impl PayloadHandler for RouteHandler {
    fn handle_send(
        &self,
        conn: &Arc<NetlinkConn>,
        message: &[u8],
        _flags: SendRecvFlags,
        dest: &NetlinkSocketAddr,
    ) -> Result<usize> {
        let header = CMsgSegHdr::parse(message)?;
        debug!(
            "route request: type = {}, flags = {:?}, seq = {}, dest = {:?}",
            header.type_,
            header.flags(),
            header.seq,
            dest
        );

        let is_dump = CSegmentType::try_from(header.type_)
            .is_ok_and(|type_| type_.is_get_request())
            && header.flags().contains(SegHdrCommonFlags::DUMP);

        let port = conn.local_addr().port();
        let reply = if is_dump {
            done_segment(&header, port)
        } else {
            error_segment(&header, port, Errno::EOPNOTSUPP)
        };
        debug!("route reply: {} bytes to port {}", reply.len(), port);
        conn.add_response(reply);

        Ok(header.len as usize)
    }
}

#[cfg(test)]
mod test {
    use zerocopy::{FromBytes, IntoBytes};

    use super::*;
    use crate::{
        net::socket::{
            CSocketAddrFamily, SockType, SocketFamilies,
            netlink::{CMsgSegErr, NetlinkProtocol, NetlinkSockIntf},
        },
        process::Context,
    };

    fn request(type_: CSegmentType, flags: SegHdrCommonFlags) -> CMsgSegHdr {
        CMsgSegHdr {
            len: CMsgSegHdr::LEN as u32,
            type_: type_ as u16,
            flags: flags.bits(),
            seq: 17,
            pid: 0,
        }
    }

    fn round_trip(request: CMsgSegHdr) -> Vec<u8> {
        let mut families = SocketFamilies::new();
        families.register(
            CSocketAddrFamily::AF_NETLINK,
            Arc::new(NetlinkSockIntf::default()),
        );
        let socket = families
            .socket(
                CSocketAddrFamily::AF_NETLINK as i32,
                SockType::SOCK_RAW as i32,
                NetlinkProtocol::NETLINK_ROUTE as i32,
            )
            .unwrap();
        let mut addr = [0u8; 12];
        NetlinkSocketAddr::new_unspecified().write_to_buf(&mut addr);
        socket.bind(&addr, &Context::new(8)).unwrap();

        let sent = socket
            .send(request.as_bytes(), SendRecvFlags::empty())
            .unwrap();
        assert_eq!(sent, CMsgSegHdr::LEN);

        let mut buf = vec![0u8; 64];
        let (len, _) = socket
            .recvfrom(&mut buf, SendRecvFlags::MSG_DONTWAIT, None)
            .unwrap();
        buf.truncate(len);
        buf
    }

    #[test]
    fn dump_gets_done() {
        let reply = round_trip(request(
            CSegmentType::GETLINK,
            SegHdrCommonFlags::REQUEST | SegHdrCommonFlags::DUMP,
        ));

        let header = CMsgSegHdr::parse(&reply).unwrap();
        assert_eq!(header.type_, CSegmentType::DONE as u16);
        assert_eq!(header.seq, 17);
        assert_eq!(header.pid, 8);
    }

    #[test]
    fn other_requests_get_error() {
        for req in [
            request(CSegmentType::GETADDR, SegHdrCommonFlags::REQUEST),
            request(
                CSegmentType::NEWROUTE,
                SegHdrCommonFlags::REQUEST | SegHdrCommonFlags::DUMP,
            ),
        ] {
            let reply = round_trip(req);

            let header = CMsgSegHdr::parse(&reply).unwrap();
            assert_eq!(header.type_, CSegmentType::ERROR as u16);
            assert_eq!(header.pid, 8);

            let (body, _) = CMsgSegErr::read_from_prefix(&reply[CMsgSegHdr::LEN..]).unwrap();
            assert_eq!(body.error, -(Errno::EOPNOTSUPP as i32));
            assert_eq!(body.msg, req);
        }
    }
}

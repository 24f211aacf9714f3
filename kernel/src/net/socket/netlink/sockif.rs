// SPDX-License-Identifier: MPL-2.0

//! The operation table of the netlink socket family.

use super::{
    addr::{NetlinkSocketAddr, UNSPECIFIED_PORT},
    config::NetlinkConfig,
    conn::{ConnPool, NetlinkConn},
    handler::PayloadHandler,
    message::CMsgSegHdr,
    notifier::ResponseNotifier,
    protocol::NetlinkProtocol,
};
use crate::{
    net::socket::{
        CSocketAddrFamily, PollFd, SendRecvFlags, SockCaps, SockIntf, SockType, Socket,
    },
    prelude::*,
    thread::work_queue::WorkQueue,
};

/// The netlink socket family.
///
/// Response notifications are delivered through [`Self::work_queue`], which
/// the embedding kernel must drive for pollers and blocking readers to be
/// woken up.
pub struct NetlinkSockIntf {
    pool: ConnPool,
    notifier: Arc<ResponseNotifier>,
    work_queue: Arc<WorkQueue>,
    handlers: BTreeMap<NetlinkProtocol, Arc<dyn PayloadHandler>>,
}

impl NetlinkSockIntf {
    pub fn new(config: NetlinkConfig) -> Self {
        let work_queue = Arc::new(WorkQueue::new());
        let notifier = Arc::new(ResponseNotifier::new(
            config.max_notifications,
            work_queue.clone(),
        ));

        #[cfg_attr(not(feature = "route"), expect(unused_mut))]
        let mut handlers: BTreeMap<NetlinkProtocol, Arc<dyn PayloadHandler>> = BTreeMap::new();
        #[cfg(feature = "route")]
        handlers.insert(
            NetlinkProtocol::NETLINK_ROUTE,
            Arc::new(super::route::RouteHandler::new()),
        );

        Self {
            pool: ConnPool::new(config.max_conns),
            notifier,
            work_queue,
            handlers,
        }
    }

    /// Replaces the payload handler of `protocol`.
    pub fn with_handler(
        mut self,
        protocol: NetlinkProtocol,
        handler: Arc<dyn PayloadHandler>,
    ) -> Self {
        self.handlers.insert(protocol, handler);
        self
    }

    /// Returns the work queue that delivers response notifications.
    pub fn work_queue(&self) -> &Arc<WorkQueue> {
        &self.work_queue
    }

    /// Returns the number of live connections.
    pub fn num_conns(&self) -> usize {
        self.pool.num_live()
    }

    /// Returns the number of pending response notifications.
    pub fn num_notifications(&self) -> usize {
        self.notifier.num_registrations()
    }

    fn conn_of(socket: &Socket) -> Result<Arc<NetlinkConn>> {
        socket.conn_as::<NetlinkConn>().ok_or(Error::with_message(
            Errno::EBADF,
            "the socket has no netlink connection",
        ))
    }

    fn do_sendto(
        &self,
        conn: &Arc<NetlinkConn>,
        buf: &[u8],
        flags: SendRecvFlags,
        dest: &NetlinkSocketAddr,
    ) -> Result<usize> {
        let header = CMsgSegHdr::parse(buf)?;
        debug!(
            "netlink send: protocol = {:?}, type = {}, len = {}",
            conn.protocol(),
            header.type_,
            header.len
        );

        let Some(handler) = self.handlers.get(&conn.protocol()) else {
            return_errno_with_message!(Errno::EOPNOTSUPP, "the netlink protocol has no handler");
        };

        handler.handle_send(conn, buf, flags, dest)
    }
}

impl Default for NetlinkSockIntf {
    fn default() -> Self {
        Self::new(NetlinkConfig::default())
    }
}

impl SockIntf for NetlinkSockIntf {
    fn setup(&self, socket: &mut Socket, protocol: i32) -> Result<()> {
        let protocol = NetlinkProtocol::try_from(protocol)?;
        if !protocol.is_compiled_in() {
            return_errno_with_message!(
                Errno::EPROTONOSUPPORT,
                "the netlink protocol is not supported"
            );
        }

        if socket.domain() != CSocketAddrFamily::AF_NETLINK
            || !matches!(socket.sock_type(), SockType::SOCK_RAW | SockType::SOCK_DGRAM)
        {
            return_errno_with_message!(
                Errno::EPROTONOSUPPORT,
                "netlink sockets must be raw or datagram sockets"
            );
        }

        let Some(conn) = self.pool.alloc(protocol, &self.notifier) else {
            return_errno_with_message!(Errno::ENOMEM, "no netlink connection is available");
        };
        debug!("netlink connection {:?} is set up", conn);

        socket.attach_conn(conn);
        Ok(())
    }

    fn sockcaps(&self, _socket: &Socket) -> SockCaps {
        SockCaps::NONBLOCKING
    }

    fn addref(&self, socket: &Socket) {
        let Some(conn) = socket.conn_as::<NetlinkConn>() else {
            panic!("duplicating a socket without a netlink connection");
        };
        conn.add_ref();
    }

    fn bind(&self, socket: &Socket, addr: &[u8], ctx: &Context) -> Result<()> {
        let conn = Self::conn_of(socket)?;
        let addr = NetlinkSocketAddr::read_from_buf(addr)?;

        let port = if addr.port() == UNSPECIFIED_PORT {
            ctx.pid()
        } else {
            addr.port()
        };
        conn.set_local_addr(NetlinkSocketAddr::new(port, addr.groups()));

        Ok(())
    }

    fn getsockname(&self, socket: &Socket, addr: &mut [u8]) -> Result<usize> {
        let conn = Self::conn_of(socket)?;
        Ok(conn.local_addr().write_to_buf(addr))
    }

    fn getpeername(&self, socket: &Socket, addr: &mut [u8]) -> Result<usize> {
        let conn = Self::conn_of(socket)?;
        Ok(conn.peer_addr().write_to_buf(addr))
    }

    fn connect(&self, socket: &Socket, addr: &[u8]) -> Result<()> {
        let conn = Self::conn_of(socket)?;
        let addr = NetlinkSocketAddr::read_from_buf(addr)?;
        conn.set_peer_addr(addr);

        Ok(())
    }

    fn poll(&self, socket: &Socket, fds: &PollFd, setup: bool) -> Result<()> {
        let conn = Self::conn_of(socket)?;

        if setup {
            conn.poll_setup(fds)
        } else {
            conn.poll_teardown();
            Ok(())
        }
    }

    fn send(&self, socket: &Socket, buf: &[u8], flags: SendRecvFlags) -> Result<usize> {
        let conn = Self::conn_of(socket)?;
        let dest = conn.peer_addr();
        self.do_sendto(&conn, buf, flags, &dest)
    }

    fn sendto(
        &self,
        socket: &Socket,
        buf: &[u8],
        flags: SendRecvFlags,
        to: &[u8],
    ) -> Result<usize> {
        let conn = Self::conn_of(socket)?;
        let dest = NetlinkSocketAddr::read_from_buf(to)?;
        self.do_sendto(&conn, buf, flags, &dest)
    }

    fn recvfrom(
        &self,
        socket: &Socket,
        buf: &mut [u8],
        flags: SendRecvFlags,
        from: Option<&mut [u8]>,
    ) -> Result<(usize, Option<usize>)> {
        let conn = Self::conn_of(socket)?;

        let entry = match conn.tryget_response() {
            Some(entry) => entry,
            None => {
                if socket.is_nonblocking() || flags.is_dontwait() {
                    return_errno_with_message!(Errno::EAGAIN, "no netlink response is queued");
                }

                let Some(entry) = conn.get_response() else {
                    error!("the wait for a netlink response ended without a response");
                    return_errno_with_message!(Errno::EPIPE, "no netlink response is available");
                };
                entry
            }
        };

        let message = entry.message();
        let copy_len = buf.len().min(message.len());
        buf[..copy_len].copy_from_slice(&message[..copy_len]);

        let from_len = from.map(|from| conn.peer_addr().write_to_buf(from));

        Ok((copy_len, from_len))
    }

    fn close(&self, socket: &mut Socket) -> Result<()> {
        let Some(conn) = socket.detach_conn() else {
            return_errno_with_message!(Errno::EBADF, "the socket is already closed");
        };
        let Ok(conn) = conn.downcast::<NetlinkConn>() else {
            return_errno_with_message!(Errno::EBADF, "the socket has no netlink connection");
        };

        if conn.release_ref() {
            self.pool.free(conn);
        }

        Ok(())
    }
}

// SPDX-License-Identifier: MPL-2.0

//! The generic socket layer.
//!
//! Every socket address family implements [`SockIntf`], the table of
//! operations that the generic layer calls without knowing the family's
//! internals. A [`Socket`] is one handle onto a family-specific connection;
//! handles duplicated with [`Socket::dup`] share the same connection.

pub use self::util::{
    family::CSocketAddrFamily,
    send_recv_flags::SendRecvFlags,
    sock_type::{SOCK_TYPE_MASK, SockCaps, SockFlags, SockType},
};
use crate::{
    events::{IoEvents, PollEvents},
    prelude::*,
    sync::Semaphore,
};

pub mod netlink;
mod util;

/// The family-specific connection attached to a socket.
pub type SocketConn = Arc<dyn Any + Send + Sync>;

/// Operations defined by a socket address family.
///
/// Addresses are passed in their C layout. An input address is a byte slice
/// holding the address structure; an output address is a caller-provided
/// buffer, which is filled up to its length, and the true length of the
/// address is returned.
pub trait SockIntf: Send + Sync {
    /// Checks the socket kind and protocol and attaches a new connection.
    fn setup(&self, socket: &mut Socket, protocol: i32) -> Result<()>;

    /// Returns the capabilities of the socket.
    fn sockcaps(&self, socket: &Socket) -> SockCaps;

    /// Adds a reference to the connection of a socket that is being duplicated.
    fn addref(&self, socket: &Socket);

    /// Assigns the local address.
    fn bind(&self, socket: &Socket, addr: &[u8], ctx: &Context) -> Result<()>;

    /// Gets the local address.
    fn getsockname(&self, socket: &Socket, addr: &mut [u8]) -> Result<usize>;

    /// Gets the address of the peer.
    fn getpeername(&self, socket: &Socket, addr: &mut [u8]) -> Result<usize>;

    /// Listens for connections on a socket.
    fn listen(&self, _socket: &Socket, _backlog: i32) -> Result<()> {
        return_errno_with_message!(Errno::EOPNOTSUPP, "listen() is not supported");
    }

    /// Connects the socket to a remote address.
    fn connect(&self, socket: &Socket, addr: &[u8]) -> Result<()>;

    /// Accepts a connection on a socket.
    fn accept(
        &self,
        _socket: &Socket,
        _addr: Option<&mut [u8]>,
    ) -> Result<(Socket, Option<usize>)> {
        return_errno_with_message!(Errno::EOPNOTSUPP, "accept() is not supported");
    }

    /// Sets up (`setup == true`) or tears down a poll on the socket.
    fn poll(&self, socket: &Socket, fds: &PollFd, setup: bool) -> Result<()>;

    /// Sends a message to the connected peer.
    fn send(&self, socket: &Socket, buf: &[u8], flags: SendRecvFlags) -> Result<usize>;

    /// Sends a message to the address `to`.
    fn sendto(
        &self,
        socket: &Socket,
        buf: &[u8],
        flags: SendRecvFlags,
        to: &[u8],
    ) -> Result<usize>;

    /// Receives a message.
    ///
    /// Returns the number of received bytes and, if `from` is provided,
    /// the length of the source address.
    fn recvfrom(
        &self,
        socket: &Socket,
        buf: &mut [u8],
        flags: SendRecvFlags,
        from: Option<&mut [u8]>,
    ) -> Result<(usize, Option<usize>)>;

    /// Closes the socket handle, detaching its connection.
    fn close(&self, socket: &mut Socket) -> Result<()>;
}

/// A poll descriptor.
///
/// It carries the events to wait for, the slot where the polled socket
/// reports the events that happened, and the semaphore that the socket posts
/// when it reports them.
#[derive(Debug)]
pub struct PollFd {
    events: IoEvents,
    revents: Arc<PollEvents>,
    sem: Arc<Semaphore>,
}

impl PollFd {
    pub fn new(events: IoEvents, sem: Arc<Semaphore>) -> Self {
        Self {
            events,
            revents: Arc::new(PollEvents::new()),
            sem,
        }
    }

    /// Returns the requested events.
    pub fn events(&self) -> IoEvents {
        self.events
    }

    /// Returns the reported events.
    pub fn revents(&self) -> IoEvents {
        self.revents.get()
    }

    pub fn revents_slot(&self) -> &Arc<PollEvents> {
        &self.revents
    }

    pub fn sem(&self) -> &Arc<Semaphore> {
        &self.sem
    }
}

/// A socket handle.
pub struct Socket {
    domain: CSocketAddrFamily,
    sock_type: SockType,
    flags: SockFlags,
    conn: Option<SocketConn>,
    sockif: Arc<dyn SockIntf>,
}

impl Socket {
    fn new(
        domain: CSocketAddrFamily,
        sock_type: SockType,
        flags: SockFlags,
        sockif: Arc<dyn SockIntf>,
    ) -> Self {
        Self {
            domain,
            sock_type,
            flags,
            conn: None,
            sockif,
        }
    }

    pub fn domain(&self) -> CSocketAddrFamily {
        self.domain
    }

    pub fn sock_type(&self) -> SockType {
        self.sock_type
    }

    pub fn is_nonblocking(&self) -> bool {
        self.flags.contains(SockFlags::SOCK_NONBLOCK)
    }

    /// Switches the socket between blocking and non-blocking mode.
    pub fn set_nonblocking(&mut self, nonblocking: bool) -> Result<()> {
        if !self.sockcaps().contains(SockCaps::NONBLOCKING) {
            return_errno_with_message!(
                Errno::EOPNOTSUPP,
                "the socket cannot be set to non-blocking mode"
            );
        }

        self.flags.set(SockFlags::SOCK_NONBLOCK, nonblocking);
        Ok(())
    }

    /// Returns the attached connection.
    pub fn conn(&self) -> Option<&SocketConn> {
        self.conn.as_ref()
    }

    /// Returns the attached connection if it is of type `T`.
    pub fn conn_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.conn.clone()?.downcast::<T>().ok()
    }

    /// Attaches a connection. Called by a family's `setup`.
    pub fn attach_conn(&mut self, conn: SocketConn) {
        debug_assert!(self.conn.is_none());
        self.conn = Some(conn);
    }

    /// Detaches the connection. Called by a family's `close`.
    pub fn detach_conn(&mut self) -> Option<SocketConn> {
        self.conn.take()
    }

    pub fn sockcaps(&self) -> SockCaps {
        self.sockif.sockcaps(self)
    }

    pub fn bind(&self, addr: &[u8], ctx: &Context) -> Result<()> {
        self.sockif.bind(self, addr, ctx)
    }

    pub fn getsockname(&self, addr: &mut [u8]) -> Result<usize> {
        self.sockif.getsockname(self, addr)
    }

    pub fn getpeername(&self, addr: &mut [u8]) -> Result<usize> {
        self.sockif.getpeername(self, addr)
    }

    pub fn listen(&self, backlog: i32) -> Result<()> {
        self.sockif.listen(self, backlog)
    }

    pub fn connect(&self, addr: &[u8]) -> Result<()> {
        self.sockif.connect(self, addr)
    }

    pub fn accept(&self, addr: Option<&mut [u8]>) -> Result<(Socket, Option<usize>)> {
        self.sockif.accept(self, addr)
    }

    pub fn send(&self, buf: &[u8], flags: SendRecvFlags) -> Result<usize> {
        self.sockif.send(self, buf, flags)
    }

    pub fn sendto(&self, buf: &[u8], flags: SendRecvFlags, to: &[u8]) -> Result<usize> {
        self.sockif.sendto(self, buf, flags, to)
    }

    pub fn recvfrom(
        &self,
        buf: &mut [u8],
        flags: SendRecvFlags,
        from: Option<&mut [u8]>,
    ) -> Result<(usize, Option<usize>)> {
        self.sockif.recvfrom(self, buf, flags, from)
    }

    pub fn poll_setup(&self, fds: &PollFd) -> Result<()> {
        self.sockif.poll(self, fds, true)
    }

    pub fn poll_teardown(&self, fds: &PollFd) -> Result<()> {
        self.sockif.poll(self, fds, false)
    }

    /// Waits until some of `events` are reported and returns them.
    ///
    /// The wait has no timeout. A family that can never report any of
    /// `events` leaves the caller waiting.
    pub fn poll(&self, events: IoEvents) -> Result<IoEvents> {
        let fds = PollFd::new(events, Arc::new(Semaphore::new(0)));

        self.poll_setup(&fds)?;
        fds.sem().wait();
        self.poll_teardown(&fds)?;

        Ok(fds.revents())
    }

    /// Duplicates the handle. Both handles share the connection.
    pub fn dup(&self) -> Result<Socket> {
        let Some(conn) = self.conn.clone() else {
            return_errno_with_message!(Errno::EBADF, "the socket is not open");
        };

        self.sockif.addref(self);

        let mut new_socket = Socket::new(
            self.domain,
            self.sock_type,
            self.flags,
            self.sockif.clone(),
        );
        new_socket.attach_conn(conn);
        Ok(new_socket)
    }

    /// Closes the handle.
    pub fn close(mut self) -> Result<()> {
        let sockif = self.sockif.clone();
        sockif.close(&mut self)
    }
}

impl Drop for Socket {
    fn drop(&mut self) {
        if self.conn.is_none() {
            return;
        }

        let sockif = self.sockif.clone();
        if let Err(err) = sockif.close(self) {
            warn!("failed to close a dropped socket: {}", err);
        }
    }
}

impl Debug for Socket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Socket")
            .field("domain", &self.domain)
            .field("sock_type", &self.sock_type)
            .field("flags", &self.flags)
            .field("is_open", &self.conn.is_some())
            .finish_non_exhaustive()
    }
}

/// The registered socket address families.
#[derive(Default)]
pub struct SocketFamilies {
    families: BTreeMap<CSocketAddrFamily, Arc<dyn SockIntf>>,
}

impl SocketFamilies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the operation table of an address family.
    pub fn register(&mut self, domain: CSocketAddrFamily, sockif: Arc<dyn SockIntf>) {
        self.families.insert(domain, sockif);
    }

    /// Creates a socket, as `socket(domain, type_, protocol)` does.
    ///
    /// `type_` may carry [`SockFlags`] in its upper bits.
    pub fn socket(&self, domain: i32, type_: i32, protocol: i32) -> Result<Socket> {
        let domain = CSocketAddrFamily::try_from(domain)?;
        let Some(sockif) = self.families.get(&domain) else {
            return_errno_with_message!(
                Errno::EAFNOSUPPORT,
                "no socket family is registered for the domain"
            );
        };
        let sock_type = SockType::try_from(type_ & SOCK_TYPE_MASK)?;
        let flags = SockFlags::from_bits_truncate(type_ & !SOCK_TYPE_MASK);
        debug!(
            "domain = {:?}, sock_type = {:?}, flags = {:?}, protocol = {}",
            domain, sock_type, flags, protocol
        );

        let mut socket = Socket::new(domain, sock_type, flags, sockif.clone());
        sockif.setup(&mut socket, protocol)?;

        Ok(socket)
    }
}

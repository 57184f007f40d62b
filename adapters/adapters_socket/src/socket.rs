//! Socket Module
//!
//! Owned socket wrapper built on the `socket2` crate. Every method forwards to
//! one platform call; nothing is validated up front, so an operation the
//! platform rejects (say `listen` on a datagram socket) comes back with the
//! platform's own error code. Failures are reported through
//! `adapters_error_reporting` before they are returned.

use std::fmt;
use std::io::{self, Read, Write};
use std::mem::MaybeUninit;
use std::net::{self, SocketAddr};

use adapters_error_reporting::report_failure;
use entities_socket_platform::{ErrorCode, RawSocket, SOCKET_ERROR};
use socket2::{Domain, Protocol as Socket2Protocol, SockAddr, Socket as Socket2, Type};

#[cfg(unix)]
use std::os::unix::io::{AsRawFd, IntoRawFd, RawFd};
#[cfg(windows)]
use std::os::windows::io::{AsRawSocket, IntoRawSocket};

use crate::sys;

/// Coarse classification of a socket failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketErrorKind {
    /// Address could not be converted to or from an IP socket address
    InvalidAddress,
    /// Address already in use
    AddressInUse,
    /// Address not available on this host
    AddressNotAvailable,
    /// Connection refused
    ConnectionRefused,
    /// Connection reset
    ConnectionReset,
    /// Connection aborted
    ConnectionAborted,
    /// Socket is not connected
    NotConnected,
    /// Timeout
    Timeout,
    /// Would block (non-blocking operation)
    WouldBlock,
    /// Interrupted by a signal
    Interrupted,
    /// Invalid argument
    InvalidInput,
    /// Permission denied
    PermissionDenied,
    /// Operation not supported
    NotSupported,
    /// Anything else; see the error code
    Other,
}

impl From<io::ErrorKind> for SocketErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        use std::io::ErrorKind;
        match kind {
            ErrorKind::AddrInUse => SocketErrorKind::AddressInUse,
            ErrorKind::AddrNotAvailable => SocketErrorKind::AddressNotAvailable,
            ErrorKind::ConnectionRefused => SocketErrorKind::ConnectionRefused,
            ErrorKind::ConnectionReset => SocketErrorKind::ConnectionReset,
            ErrorKind::ConnectionAborted => SocketErrorKind::ConnectionAborted,
            ErrorKind::NotConnected => SocketErrorKind::NotConnected,
            ErrorKind::TimedOut => SocketErrorKind::Timeout,
            ErrorKind::WouldBlock => SocketErrorKind::WouldBlock,
            ErrorKind::Interrupted => SocketErrorKind::Interrupted,
            ErrorKind::InvalidInput => SocketErrorKind::InvalidInput,
            ErrorKind::PermissionDenied => SocketErrorKind::PermissionDenied,
            ErrorKind::Unsupported => SocketErrorKind::NotSupported,
            _ => SocketErrorKind::Other,
        }
    }
}

/// A failed socket operation
///
/// Carries the name of the operation, a coarse kind, and the platform error
/// code exactly as the operating system reported it (absent only for failures
/// that never reached the platform).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketError {
    operation: &'static str,
    kind: SocketErrorKind,
    code: Option<ErrorCode>,
}

impl SocketError {
    pub fn new(operation: &'static str, kind: SocketErrorKind, code: Option<ErrorCode>) -> Self {
        Self {
            operation,
            kind,
            code,
        }
    }

    /// Error for a platform call that failed with `code`
    pub fn os(operation: &'static str, code: ErrorCode) -> Self {
        let kind = io::Error::from(code).kind().into();
        Self::new(operation, kind, Some(code))
    }

    /// Error from an `io::Error` returned by `socket2` or `std`
    pub fn from_io(operation: &'static str, err: io::Error) -> Self {
        Self::new(
            operation,
            err.kind().into(),
            err.raw_os_error().map(ErrorCode::from_raw),
        )
    }

    /// Name of the failed operation
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn kind(&self) -> SocketErrorKind {
        self.kind
    }

    /// Platform error code, unchanged
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn raw_os_error(&self) -> Option<i32> {
        self.code.map(ErrorCode::raw)
    }
}

impl From<SocketError> for io::Error {
    fn from(err: SocketError) -> Self {
        match err.code {
            Some(code) => io::Error::from(code),
            None => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}

impl fmt::Display for SocketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "{} failed: {} (os error {})",
                self.operation,
                code.message(),
                code
            ),
            None => write!(f, "{} failed: {:?}", self.operation, self.kind),
        }
    }
}

impl std::error::Error for SocketError {}

/// Build the error for a failed `operation` and report it
pub(crate) fn reported(operation: &'static str) -> impl FnOnce(io::Error) -> SocketError {
    move |err| {
        let err = SocketError::from_io(operation, err);
        if let Some(code) = err.code() {
            report_failure(operation, code);
        }
        err
    }
}

/// Address family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// IPv4
    Ipv4,
    /// IPv6
    Ipv6,
}

impl AddressFamily {
    /// Family matching an IP socket address
    pub fn of(addr: &SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(_) => AddressFamily::Ipv4,
            SocketAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

impl From<AddressFamily> for Domain {
    fn from(family: AddressFamily) -> Self {
        match family {
            AddressFamily::Ipv4 => Domain::IPV4,
            AddressFamily::Ipv6 => Domain::IPV6,
        }
    }
}

/// Socket type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Stream socket (TCP)
    Stream,
    /// Datagram socket (UDP)
    Datagram,
}

impl From<SocketType> for Type {
    fn from(ty: SocketType) -> Self {
        match ty {
            SocketType::Stream => Type::STREAM,
            SocketType::Datagram => Type::DGRAM,
        }
    }
}

/// Protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Let the platform pick (protocol 0)
    Default,
    /// TCP
    Tcp,
    /// UDP
    Udp,
}

impl Protocol {
    fn to_socket2(self) -> Option<Socket2Protocol> {
        match self {
            Protocol::Default => None,
            Protocol::Tcp => Some(Socket2Protocol::TCP),
            Protocol::Udp => Some(Socket2Protocol::UDP),
        }
    }
}

/// Which direction `shutdown` stops
///
/// The discriminants are the values the platform expects: 0 = receive,
/// 1 = send, 2 = both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ShutdownHow {
    Receive = 0,
    Send = 1,
    Both = 2,
}

impl ShutdownHow {
    pub fn from_raw(how: i32) -> Option<Self> {
        match how {
            0 => Some(ShutdownHow::Receive),
            1 => Some(ShutdownHow::Send),
            2 => Some(ShutdownHow::Both),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

impl From<ShutdownHow> for net::Shutdown {
    fn from(how: ShutdownHow) -> Self {
        match how {
            ShutdownHow::Receive => net::Shutdown::Read,
            ShutdownHow::Send => net::Shutdown::Write,
            ShutdownHow::Both => net::Shutdown::Both,
        }
    }
}

/// Socket wrapper
///
/// Owns one platform socket. Dropping it closes the handle silently; use
/// [`Socket::close`] to see the result of the close call.
pub struct Socket {
    inner: Socket2,
    family: AddressFamily,
    socket_type: SocketType,
    protocol: Protocol,
}

impl Socket {
    /// Create a new socket
    ///
    /// The socket starts in blocking mode.
    ///
    /// # Arguments
    ///
    /// * `family` - Address family (IPv4 or IPv6)
    /// * `socket_type` - Socket type (Stream or Datagram)
    /// * `protocol` - Protocol (Default, TCP or UDP)
    pub fn new(
        family: AddressFamily,
        socket_type: SocketType,
        protocol: Protocol,
    ) -> Result<Self, SocketError> {
        let inner = Socket2::new(family.into(), socket_type.into(), protocol.to_socket2())
            .map_err(reported("socket"))?;
        log::trace!("socket created: {:?} {:?} {:?}", family, socket_type, protocol);

        Ok(Self {
            inner,
            family,
            socket_type,
            protocol,
        })
    }

    /// Bind socket to an address
    pub fn bind(&self, addr: &SocketAddr) -> Result<(), SocketError> {
        self.inner
            .bind(&SockAddr::from(*addr))
            .map_err(reported("bind"))
    }

    /// Listen for incoming connections
    ///
    /// # Arguments
    ///
    /// * `backlog` - Maximum number of pending connections
    pub fn listen(&self, backlog: i32) -> Result<(), SocketError> {
        self.inner.listen(backlog).map_err(reported("listen"))
    }

    /// Accept an incoming connection
    ///
    /// # Returns
    ///
    /// * `Ok((Socket, SocketAddr))` - Accepted connection and peer address
    /// * `Err(SocketError)` - Error accepting connection
    pub fn accept(&self) -> Result<(Socket, SocketAddr), SocketError> {
        let (socket, addr) = self.inner.accept().map_err(reported("accept"))?;

        let peer = addr.as_socket().ok_or_else(|| {
            SocketError::new("accept", SocketErrorKind::InvalidAddress, None)
        })?;

        let accepted = Socket {
            inner: socket,
            family: self.family,
            socket_type: self.socket_type,
            protocol: self.protocol,
        };

        Ok((accepted, peer))
    }

    /// Connect to a remote address
    pub fn connect(&self, addr: &SocketAddr) -> Result<(), SocketError> {
        self.inner
            .connect(&SockAddr::from(*addr))
            .map_err(reported("connect"))
    }

    /// Send data on a connected socket
    ///
    /// Returns the number of bytes the platform accepted.
    pub fn send(&self, buf: &[u8]) -> Result<usize, SocketError> {
        self.inner.send(buf).map_err(reported("send"))
    }

    /// Receive data from a connected socket
    ///
    /// Returns the number of bytes received; 0 means the peer closed its side.
    pub fn recv(&self, buf: &mut [u8]) -> Result<usize, SocketError> {
        (&self.inner).read(buf).map_err(reported("recv"))
    }

    /// Send a datagram to `addr`
    pub fn send_to(&self, buf: &[u8], addr: &SocketAddr) -> Result<usize, SocketError> {
        self.inner
            .send_to(buf, &SockAddr::from(*addr))
            .map_err(reported("sendto"))
    }

    /// Receive a datagram and its sender's address
    pub fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), SocketError> {
        // SAFETY: an initialized u8 slice is a valid MaybeUninit<u8> slice of
        // the same length, and recv_from only writes into it.
        let uninit_buf: &mut [MaybeUninit<u8>] = unsafe {
            std::slice::from_raw_parts_mut(buf.as_mut_ptr() as *mut MaybeUninit<u8>, buf.len())
        };

        let (n, sock_addr) = self
            .inner
            .recv_from(uninit_buf)
            .map_err(reported("recvfrom"))?;

        let addr = sock_addr.as_socket().ok_or_else(|| {
            SocketError::new("recvfrom", SocketErrorKind::InvalidAddress, None)
        })?;

        Ok((n, addr))
    }

    /// Shut down one or both directions of a connected socket
    pub fn shutdown(&self, how: ShutdownHow) -> Result<(), SocketError> {
        self.inner.shutdown(how.into()).map_err(reported("shutdown"))
    }

    /// Close the socket and return the platform's verdict
    ///
    /// Calls `close` (POSIX) or `closesocket` (Windows) directly.
    pub fn close(self) -> Result<(), SocketError> {
        #[cfg(unix)]
        let raw: RawSocket = self.inner.into_raw_fd();
        #[cfg(windows)]
        let raw: RawSocket = self.inner.into_raw_socket() as RawSocket;

        // SAFETY: ownership of the handle moved out of socket2 above, so it is
        // closed exactly once.
        if unsafe { sys::close(raw) } == SOCKET_ERROR {
            let code = ErrorCode::last();
            report_failure("close", code);
            return Err(SocketError::os("close", code));
        }
        log::trace!("socket {} closed", raw);
        Ok(())
    }

    /// Get the local address
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        let addr = self.inner.local_addr().map_err(reported("getsockname"))?;
        addr.as_socket()
            .ok_or_else(|| SocketError::new("getsockname", SocketErrorKind::InvalidAddress, None))
    }

    /// Get the peer address
    pub fn peer_addr(&self) -> Result<SocketAddr, SocketError> {
        let addr = self.inner.peer_addr().map_err(reported("getpeername"))?;
        addr.as_socket()
            .ok_or_else(|| SocketError::new("getpeername", SocketErrorKind::InvalidAddress, None))
    }

    /// Switch between blocking and non-blocking mode
    pub fn set_nonblocking(&self, nonblocking: bool) -> Result<(), SocketError> {
        self.inner
            .set_nonblocking(nonblocking)
            .map_err(reported("set_nonblocking"))
    }

    /// Set socket option for reuse address
    pub fn set_reuse_address(&self, reuse: bool) -> Result<(), SocketError> {
        self.inner
            .set_reuse_address(reuse)
            .map_err(reported("setsockopt"))
    }

    /// The platform handle, in the width the raw forwarding layer uses
    #[cfg(unix)]
    pub fn raw_handle(&self) -> RawSocket {
        self.inner.as_raw_fd()
    }

    #[cfg(windows)]
    pub fn raw_handle(&self) -> RawSocket {
        self.inner.as_raw_socket() as RawSocket
    }

    /// Get the raw file descriptor (Unix)
    #[cfg(unix)]
    pub fn as_raw_fd(&self) -> RawFd {
        self.inner.as_raw_fd()
    }

    /// Get the raw socket handle (Windows)
    #[cfg(windows)]
    pub fn as_raw_socket(&self) -> std::os::windows::io::RawSocket {
        self.inner.as_raw_socket()
    }

    /// Get the underlying socket2 socket
    pub fn inner(&self) -> &Socket2 {
        &self.inner
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socket")
            .field("handle", &self.raw_handle())
            .field("family", &self.family)
            .field("socket_type", &self.socket_type)
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl Read for Socket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for Socket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

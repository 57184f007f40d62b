//! TCP Socket Module
//!
//! Stream socket convenience over [`Socket`]: the type and protocol are fixed,
//! everything else forwards.

use std::io::{self, Read, Write};
use std::net::SocketAddr;

use entities_socket_platform::RawSocket;

use super::socket::{AddressFamily, Protocol, ShutdownHow, Socket, SocketError, SocketType};

/// TCP Socket
#[derive(Debug)]
pub struct TcpSocket {
    socket: Socket,
}

impl TcpSocket {
    /// Create a new TCP socket
    ///
    /// # Arguments
    ///
    /// * `family` - Address family (IPv4 or IPv6)
    ///
    /// # Returns
    ///
    /// * `Ok(TcpSocket)` - Created socket
    /// * `Err(SocketError)` - Error creating socket
    pub fn new(family: AddressFamily) -> Result<Self, SocketError> {
        let socket = Socket::new(family, SocketType::Stream, Protocol::Tcp)?;
        Ok(Self { socket })
    }

    /// Create a socket, bind it to `addr` and start listening
    pub fn listen_on(addr: &SocketAddr, backlog: i32) -> Result<Self, SocketError> {
        let socket = Self::new(AddressFamily::of(addr))?;
        socket.bind(addr)?;
        socket.listen(backlog)?;
        Ok(socket)
    }

    /// Create a socket and connect it to `addr`
    pub fn connect_to(addr: &SocketAddr) -> Result<Self, SocketError> {
        let socket = Self::new(AddressFamily::of(addr))?;
        socket.connect(addr)?;
        Ok(socket)
    }

    pub fn bind(&self, addr: &SocketAddr) -> Result<(), SocketError> {
        self.socket.bind(addr)
    }

    pub fn listen(&self, backlog: i32) -> Result<(), SocketError> {
        self.socket.listen(backlog)
    }

    /// Accept an incoming connection
    ///
    /// # Returns
    ///
    /// * `Ok((TcpSocket, SocketAddr))` - Accepted connection and peer address
    /// * `Err(SocketError)` - Error accepting connection
    pub fn accept(&self) -> Result<(TcpSocket, SocketAddr), SocketError> {
        let (socket, addr) = self.socket.accept()?;
        Ok((TcpSocket { socket }, addr))
    }

    pub fn connect(&self, addr: &SocketAddr) -> Result<(), SocketError> {
        self.socket.connect(addr)
    }

    /// Send data
    ///
    /// Returns the number of bytes the platform accepted, which may be less
    /// than `buf.len()`.
    pub fn send(&self, buf: &[u8]) -> Result<usize, SocketError> {
        self.socket.send(buf)
    }

    /// Receive data
    ///
    /// Returns 0 once the peer has shut down its sending side.
    pub fn recv(&self, buf: &mut [u8]) -> Result<usize, SocketError> {
        self.socket.recv(buf)
    }

    pub fn shutdown(&self, how: ShutdownHow) -> Result<(), SocketError> {
        self.socket.shutdown(how)
    }

    pub fn close(self) -> Result<(), SocketError> {
        self.socket.close()
    }

    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        self.socket.local_addr()
    }

    pub fn peer_addr(&self) -> Result<SocketAddr, SocketError> {
        self.socket.peer_addr()
    }

    pub fn set_nonblocking(&self, nonblocking: bool) -> Result<(), SocketError> {
        self.socket.set_nonblocking(nonblocking)
    }

    pub fn raw_handle(&self) -> RawSocket {
        self.socket.raw_handle()
    }

    /// Get the underlying socket
    pub fn inner(&self) -> &Socket {
        &self.socket
    }
}

impl Read for TcpSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket.read(buf)
    }
}

impl Write for TcpSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.socket.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.socket.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::SocketErrorKind;
    use std::net::Ipv4Addr;
    use std::thread;

    fn loopback() -> SocketAddr {
        SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)
    }

    #[test]
    fn test_tcp_socket_creation() {
        assert!(TcpSocket::new(AddressFamily::Ipv4).is_ok());
        assert!(TcpSocket::new(AddressFamily::Ipv6).is_ok());
    }

    #[test]
    fn test_tcp_socket_inner() {
        let socket = TcpSocket::new(AddressFamily::Ipv4).unwrap();
        assert_eq!(socket.inner().socket_type(), SocketType::Stream);
        assert_eq!(socket.inner().protocol(), Protocol::Tcp);
        assert_eq!(socket.raw_handle(), socket.inner().raw_handle());
    }

    #[test]
    fn test_tcp_listen_on() {
        let listener = TcpSocket::listen_on(&loopback(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        assert_eq!(addr.ip(), Ipv4Addr::LOCALHOST);
        assert!(addr.port() > 0);
    }

    #[test]
    fn test_tcp_echo() {
        let listener = TcpSocket::listen_on(&loopback(), 1).unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (conn, _) = listener.accept().unwrap();
            let mut buf = [0u8; 32];
            let n = conn.recv(&mut buf).unwrap();
            conn.send(&buf[..n]).unwrap();
            conn.shutdown(ShutdownHow::Both).unwrap();
        });

        let client = TcpSocket::connect_to(&addr).unwrap();
        assert_eq!(client.peer_addr().unwrap(), addr);
        client.send(b"echo").unwrap();

        let mut buf = [0u8; 32];
        let mut total = 0;
        loop {
            let n = client.recv(&mut buf[total..]).unwrap();
            if n == 0 {
                break;
            }
            total += n;
        }
        assert_eq!(&buf[..total], b"echo");

        server.join().unwrap();
        client.close().unwrap();
    }

    #[test]
    fn test_tcp_read_write_traits() {
        let listener = TcpSocket::listen_on(&loopback(), 1).unwrap();
        let addr = listener.local_addr().unwrap();

        let writer = thread::spawn(move || {
            let mut client = TcpSocket::connect_to(&addr).unwrap();
            client.write_all(b"stream bytes").unwrap();
            client.flush().unwrap();
        });

        let (mut conn, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        conn.read_to_end(&mut received).unwrap();
        assert_eq!(received, b"stream bytes");

        writer.join().unwrap();
    }

    #[test]
    fn test_tcp_socket_peer_addr_not_connected() {
        let socket = TcpSocket::new(AddressFamily::Ipv4).unwrap();
        let err = socket.peer_addr().unwrap_err();
        assert_eq!(err.kind(), SocketErrorKind::NotConnected);
    }

    #[test]
    fn test_tcp_accept_nonblocking_would_block() {
        let listener = TcpSocket::listen_on(&loopback(), 1).unwrap();
        listener.set_nonblocking(true).unwrap();
        let err = listener.accept().unwrap_err();
        assert_eq!(err.kind(), SocketErrorKind::WouldBlock);
    }
}

//! UDP Socket Module
//!
//! Datagram socket convenience over [`Socket`].

use std::net::SocketAddr;

use entities_socket_platform::RawSocket;

use super::socket::{AddressFamily, Protocol, Socket, SocketError, SocketType};

/// UDP Socket
#[derive(Debug)]
pub struct UdpSocket {
    socket: Socket,
}

impl UdpSocket {
    /// Create a new UDP socket
    ///
    /// # Arguments
    ///
    /// * `family` - Address family (IPv4 or IPv6)
    pub fn new(family: AddressFamily) -> Result<Self, SocketError> {
        let socket = Socket::new(family, SocketType::Datagram, Protocol::Udp)?;
        Ok(Self { socket })
    }

    /// Create a socket already bound to `addr`
    pub fn bound(addr: &SocketAddr) -> Result<Self, SocketError> {
        let socket = Self::new(AddressFamily::of(addr))?;
        socket.bind(addr)?;
        Ok(socket)
    }

    pub fn bind(&self, addr: &SocketAddr) -> Result<(), SocketError> {
        self.socket.bind(addr)
    }

    /// Send a datagram to `addr`
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of bytes sent
    /// * `Err(SocketError)` - Error sending
    pub fn send_to(&self, buf: &[u8], addr: &SocketAddr) -> Result<usize, SocketError> {
        self.socket.send_to(buf, addr)
    }

    /// Receive a datagram from any address
    ///
    /// A datagram longer than `buf` is truncated to fit.
    ///
    /// # Returns
    ///
    /// * `Ok((usize, SocketAddr))` - Number of bytes received and sender address
    /// * `Err(SocketError)` - Error receiving
    pub fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), SocketError> {
        self.socket.recv_from(buf)
    }

    /// Fix the default peer (connected UDP)
    pub fn connect(&self, addr: &SocketAddr) -> Result<(), SocketError> {
        self.socket.connect(addr)
    }

    /// Send to the connected peer
    pub fn send(&self, buf: &[u8]) -> Result<usize, SocketError> {
        self.socket.send(buf)
    }

    /// Receive from the connected peer
    pub fn recv(&self, buf: &mut [u8]) -> Result<usize, SocketError> {
        self.socket.recv(buf)
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

//! Adapters Layer: Sockets
//!
//! Forwards socket operations to the platform socket API.
//!
//! ## Overview
//!
//! The `adapters_socket` crate provides two levels:
//! - **Raw forwarding** ([`sys`]): one `unsafe` function per BSD/Winsock call,
//!   with platform integer widths normalized
//! - **Owned sockets** ([`Socket`], [`TcpSocket`], [`UdpSocket`]): safe
//!   wrappers built on `socket2` that close on drop and return [`SocketError`]
//!
//! Neither level retries, buffers, or validates ahead of the platform. Failures
//! in the owned-socket API are passed to `adapters_error_reporting` before being
//! returned, and the platform error code travels unchanged inside
//! [`SocketError`].
//!
//! ## See Also
//!
//! - `adapters_error_reporting`: failure report formatting and configuration
//! - `frameworks_network_init`: platform networking startup (Winsock)

pub mod socket;
pub mod sys;
pub mod tcp;
pub mod udp;

pub use socket::{
    AddressFamily, Protocol, ShutdownHow, Socket, SocketError, SocketErrorKind, SocketType,
};
pub use tcp::TcpSocket;
pub use udp::UdpSocket;

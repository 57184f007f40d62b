//! API Facades Layer
//!
//! The `wratchet_*` functions with C signatures, for C callers linking the
//! static library (see `include/wratchet/socket.h`). Each facade calls one
//! function in an inner layer and returns its result unchanged.
//!
//! Rust callers should prefer the owned-socket API, re-exported here from the
//! inner layers.

pub mod init_facades;
pub mod socket_facades;

pub use init_facades::*;
pub use socket_facades::*;

// Safe Rust API
pub use adapters_error_reporting::{report_mode, set_report_mode, ReportMode};
pub use adapters_socket::{
    AddressFamily, Protocol, ShutdownHow, Socket, SocketError, SocketErrorKind, SocketType,
    TcpSocket, UdpSocket,
};
pub use entities_socket_platform::ErrorCode;
pub use frameworks_network_init::{InitError, NetworkGuard};

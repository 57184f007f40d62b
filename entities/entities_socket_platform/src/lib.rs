//! Entities Layer: Socket Platform Types
//!
//! Provides the plain data the rest of the workspace shares: the integer widths
//! and native structures that differ between POSIX sockets and Winsock, and the
//! platform error code type.
//!
//! ## Overview
//!
//! - **Platform types**: socket handle, address length, buffer length and I/O
//!   result widths, native `sockaddr` aliases and sentinel values
//! - **Error codes**: `errno` / `WSAGetLastError` values, their messages, and
//!   restoring them after a diagnostic has run
//!
//! Nothing in this crate performs socket I/O.

pub mod error_code;
pub mod platform;

pub use error_code::ErrorCode;
pub use platform::{
    buf_len, sock_len, BufLen, IoLen, RawSocket, SockAddrInRaw, SockAddrRaw, SockLen,
    INVALID_SOCKET, SOCKET_ERROR,
};

//! Platform Types Module
//!
//! Integer widths and native structures that differ between POSIX sockets and
//! Winsock. Callers use these aliases so the same code compiles on both.

use std::ffi::c_int;

#[cfg(unix)]
mod imp {
    use std::ffi::c_int;

    /// Socket handle (a file descriptor)
    pub type RawSocket = libc::c_int;
    /// Address length argument
    pub type SockLen = libc::socklen_t;
    /// Buffer length argument for `send`/`recv`
    pub type BufLen = libc::size_t;
    /// Byte count returned by `send`/`recv`
    pub type IoLen = libc::ssize_t;
    pub type SockAddrRaw = libc::sockaddr;
    pub type SockAddrInRaw = libc::sockaddr_in;

    pub const INVALID_SOCKET: RawSocket = -1;

    pub const SOCK_STREAM: c_int = libc::SOCK_STREAM;
    pub const SOCK_DGRAM: c_int = libc::SOCK_DGRAM;
    pub const AF_INET: c_int = libc::AF_INET;
    pub const AF_INET6: c_int = libc::AF_INET6;

    pub const SHUT_RD: c_int = libc::SHUT_RD;
    pub const SHUT_WR: c_int = libc::SHUT_WR;
    pub const SHUT_RDWR: c_int = libc::SHUT_RDWR;
}

#[cfg(windows)]
mod imp {
    use std::ffi::c_int;
    use windows_sys::Win32::Networking::WinSock;

    /// Socket handle (`SOCKET`, pointer sized)
    pub type RawSocket = WinSock::SOCKET;
    /// Address length argument
    pub type SockLen = i32;
    /// Buffer length argument for `send`/`recv`
    pub type BufLen = i32;
    /// Byte count returned by `send`/`recv`
    pub type IoLen = i32;
    pub type SockAddrRaw = WinSock::SOCKADDR;
    pub type SockAddrInRaw = WinSock::SOCKADDR_IN;

    pub const INVALID_SOCKET: RawSocket = WinSock::INVALID_SOCKET;

    pub const SOCK_STREAM: c_int = WinSock::SOCK_STREAM as c_int;
    pub const SOCK_DGRAM: c_int = WinSock::SOCK_DGRAM as c_int;
    pub const AF_INET: c_int = WinSock::AF_INET as c_int;
    pub const AF_INET6: c_int = WinSock::AF_INET6 as c_int;

    pub const SHUT_RD: c_int = WinSock::SD_RECEIVE as c_int;
    pub const SHUT_WR: c_int = WinSock::SD_SEND as c_int;
    pub const SHUT_RDWR: c_int = WinSock::SD_BOTH as c_int;
}

pub use imp::*;

/// Return value of every integer-returning socket call on failure
pub const SOCKET_ERROR: c_int = -1;

/// Convert a C `int` address length into the platform's width
///
/// Returns `None` when the value cannot be represented (a negative length on
/// platforms where `socklen_t` is unsigned).
pub fn sock_len(len: c_int) -> Option<SockLen> {
    SockLen::try_from(len).ok()
}

/// Convert a C `int` buffer length into the platform's width
///
/// Returns `None` when the value cannot be represented (a negative length on
/// platforms where the length is `size_t`).
pub fn buf_len(len: c_int) -> Option<BufLen> {
    BufLen::try_from(len).ok()
}

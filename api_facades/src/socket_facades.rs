//! Socket Facades
//!
//! `wratchet_socket_*` functions with C signatures. Lengths arrive as C `int`
//! and are converted to the platform's width before the call; the return value
//! and the thread's last-error value are whatever the platform produced.
//!
//! ## Examples
//!
//! ```c
//! wratchet_socket s = wratchet_socket_create(AF_INET, WRATCHET_DGRAM, 0);
//! if (s == WRATCHET_INVALID_SOCKET)
//!     wratchet_display_error("Could not create socket");
//! ```
//!
//! A failing call is reported according to the configured report mode before
//! it returns. A negative length never reaches the platform: the call fails
//! with `EINVAL` (`WSAEINVAL` on Windows).

#![allow(non_camel_case_types)]

use std::ffi::{c_int, c_void};
use std::ptr;

use adapters_error_reporting::report_failure;
use adapters_socket::sys;
use entities_socket_platform::platform::{SHUT_RD, SHUT_RDWR, SHUT_WR, SOCK_DGRAM, SOCK_STREAM};
use entities_socket_platform::{
    buf_len, sock_len, ErrorCode, IoLen, RawSocket, SockAddrInRaw, SockAddrRaw, SockLen,
    INVALID_SOCKET, SOCKET_ERROR,
};

/// Socket handle as C callers see it
pub type wratchet_socket = RawSocket;
pub type wratchet_sockaddr = SockAddrRaw;
pub type wratchet_sockaddr_in = SockAddrInRaw;

pub const WRATCHET_STREAM: c_int = SOCK_STREAM;
pub const WRATCHET_DGRAM: c_int = SOCK_DGRAM;

pub const WRATCHET_SHUT_RECEIVE: c_int = SHUT_RD;
pub const WRATCHET_SHUT_SEND: c_int = SHUT_WR;
pub const WRATCHET_SHUT_BOTH: c_int = SHUT_RDWR;

pub const WRATCHET_INVALID_SOCKET: wratchet_socket = INVALID_SOCKET;

fn failed(operation: &str) {
    report_failure(operation, ErrorCode::last());
}

fn rejected(operation: &str) {
    ErrorCode::INVALID_ARGUMENT.restore();
    report_failure(operation, ErrorCode::INVALID_ARGUMENT);
}

fn checked(operation: &str, rc: c_int) -> c_int {
    if rc == SOCKET_ERROR {
        failed(operation);
    }
    rc
}

fn checked_io(operation: &str, n: IoLen) -> c_int {
    if n < 0 {
        failed(operation);
        return SOCKET_ERROR;
    }
    // n never exceeds the int length the caller passed in
    n as c_int
}

/// Create a new socket
///
/// # Arguments
///
/// * `domain` - Protocol family, generally `AF_INET`
/// * `ty` - `WRATCHET_STREAM` or `WRATCHET_DGRAM`
/// * `proto` - Protocol, 0 for the default
///
/// Returns `WRATCHET_INVALID_SOCKET` on failure.
#[no_mangle]
pub extern "C" fn wratchet_socket_create(domain: c_int, ty: c_int, proto: c_int) -> wratchet_socket {
    // SAFETY: no pointer arguments
    let s = unsafe { sys::socket(domain, ty, proto) };
    if s == INVALID_SOCKET {
        failed("socket");
    }
    s
}

/// Close the socket
///
/// # Safety
///
/// `s` must not be used again after this call, whatever it returns.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_destroy(s: wratchet_socket) -> c_int {
    checked("close", sys::close(s))
}

/// Connect a socket to a remote address
///
/// # Safety
///
/// `addr` must point to `addrlen` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_connect(
    s: wratchet_socket,
    addr: *const wratchet_sockaddr,
    addrlen: c_int,
) -> c_int {
    let Some(addrlen) = sock_len(addrlen) else {
        rejected("connect");
        return SOCKET_ERROR;
    };
    checked("connect", sys::connect(s, addr, addrlen))
}

/// Bind a socket to an address and port on the local machine
///
/// # Safety
///
/// `addr` must point to `addrlen` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_bind(
    s: wratchet_socket,
    addr: *const wratchet_sockaddr,
    addrlen: c_int,
) -> c_int {
    let Some(addrlen) = sock_len(addrlen) else {
        rejected("bind");
        return SOCKET_ERROR;
    };
    checked("bind", sys::bind(s, addr, addrlen))
}

/// Accept a connection on a listening socket
///
/// `addr` and `addrlen` may both be null. Otherwise `*addrlen` is the size of
/// `addr` on entry and the size of the peer address on return.
///
/// # Safety
///
/// When non-null, `addrlen` must be valid for reads and writes and `addr` must
/// point to `*addrlen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_accept(
    s: wratchet_socket,
    addr: *mut wratchet_sockaddr,
    addrlen: *mut c_int,
) -> wratchet_socket {
    let mut len: SockLen = 0;
    let len_ptr: *mut SockLen = if addrlen.is_null() {
        ptr::null_mut()
    } else {
        match sock_len(*addrlen) {
            Some(l) => {
                len = l;
                &mut len as *mut SockLen
            }
            None => {
                rejected("accept");
                return INVALID_SOCKET;
            }
        }
    };

    let conn = sys::accept(s, addr, len_ptr);
    if conn == INVALID_SOCKET {
        failed("accept");
        return conn;
    }
    if !addrlen.is_null() {
        *addrlen = len as c_int;
    }
    conn
}

/// Send data on a connected socket
///
/// # Safety
///
/// `msg` must point to `msglen` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_send(
    s: wratchet_socket,
    msg: *const c_void,
    msglen: c_int,
) -> c_int {
    let Some(len) = buf_len(msglen) else {
        rejected("send");
        return SOCKET_ERROR;
    };
    checked_io("send", sys::send(s, msg, len))
}

/// Send a datagram to `addr`
///
/// # Safety
///
/// `msg` must point to `msglen` readable bytes and `addr` to `addrlen`.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_sendto(
    s: wratchet_socket,
    msg: *const c_void,
    msglen: c_int,
    addr: *const wratchet_sockaddr,
    addrlen: c_int,
) -> c_int {
    let (Some(len), Some(addrlen)) = (buf_len(msglen), sock_len(addrlen)) else {
        rejected("sendto");
        return SOCKET_ERROR;
    };
    checked_io("sendto", sys::sendto(s, msg, len, addr, addrlen))
}

/// Receive data from a connected socket
///
/// # Safety
///
/// `msg` must point to `msglen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_recv(
    s: wratchet_socket,
    msg: *mut c_void,
    msglen: c_int,
) -> c_int {
    let Some(len) = buf_len(msglen) else {
        rejected("recv");
        return SOCKET_ERROR;
    };
    checked_io("recv", sys::recv(s, msg, len))
}

/// Receive a datagram and its sender's address
///
/// `addr` and `addrlen` may both be null when the sender is not wanted.
///
/// # Safety
///
/// `msg` must point to `msglen` writable bytes. When non-null, `addrlen` must
/// be valid for reads and writes and `addr` must point to `*addrlen` writable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_recvfrom(
    s: wratchet_socket,
    msg: *mut c_void,
    msglen: c_int,
    addr: *mut wratchet_sockaddr,
    addrlen: *mut c_int,
) -> c_int {
    let Some(len) = buf_len(msglen) else {
        rejected("recvfrom");
        return SOCKET_ERROR;
    };

    let mut from_len: SockLen = 0;
    let from_len_ptr: *mut SockLen = if addrlen.is_null() {
        ptr::null_mut()
    } else {
        match sock_len(*addrlen) {
            Some(l) => {
                from_len = l;
                &mut from_len as *mut SockLen
            }
            None => {
                rejected("recvfrom");
                return SOCKET_ERROR;
            }
        }
    };

    let n = checked_io("recvfrom", sys::recvfrom(s, msg, len, addr, from_len_ptr));
    if n != SOCKET_ERROR && !addrlen.is_null() {
        *addrlen = from_len as c_int;
    }
    n
}

/// Listen for connections on a socket
///
/// # Safety
///
/// `s` must be a socket handle owned by the caller.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_listen(s: wratchet_socket, backlog: c_int) -> c_int {
    checked("listen", sys::listen(s, backlog))
}

/// Shut down communication on a socket
///
/// `how`: 0 = receive, 1 = send, 2 = both. Other values are passed through and
/// the platform rejects them.
///
/// # Safety
///
/// `s` must be a socket handle owned by the caller.
#[no_mangle]
pub unsafe extern "C" fn wratchet_socket_shutdown(s: wratchet_socket, how: c_int) -> c_int {
    checked("shutdown", sys::shutdown(s, how))
}

//! Raw Forwarding Module
//!
//! One function per platform socket call. Each body is a single call into
//! `libc` (POSIX) or `windows-sys` (Winsock) with the integer widths taken from
//! `entities_socket_platform`, so callers write the same code on both. Flags
//! are always 0.
//!
//! Nothing here reports or translates errors: the return value and the
//! thread's last-error value are exactly what the platform produced.
//!
//! # Safety
//!
//! Every function is `unsafe` for the same reason the platform call is: the
//! pointer arguments must be valid for the lengths passed alongside them, and
//! `s` must be a socket handle the caller owns.

#[cfg(unix)]
mod imp {
    use std::ffi::{c_int, c_void};

    use entities_socket_platform::{BufLen, IoLen, RawSocket, SockAddrRaw, SockLen};

    pub unsafe fn socket(domain: c_int, ty: c_int, proto: c_int) -> RawSocket {
        libc::socket(domain, ty, proto)
    }

    pub unsafe fn close(s: RawSocket) -> c_int {
        libc::close(s)
    }

    pub unsafe fn connect(s: RawSocket, addr: *const SockAddrRaw, addrlen: SockLen) -> c_int {
        libc::connect(s, addr, addrlen)
    }

    pub unsafe fn bind(s: RawSocket, addr: *const SockAddrRaw, addrlen: SockLen) -> c_int {
        libc::bind(s, addr, addrlen)
    }

    pub unsafe fn accept(s: RawSocket, addr: *mut SockAddrRaw, addrlen: *mut SockLen) -> RawSocket {
        libc::accept(s, addr, addrlen)
    }

    pub unsafe fn send(s: RawSocket, buf: *const c_void, len: BufLen) -> IoLen {
        libc::send(s, buf, len, 0)
    }

    pub unsafe fn recv(s: RawSocket, buf: *mut c_void, len: BufLen) -> IoLen {
        libc::recv(s, buf, len, 0)
    }

    pub unsafe fn sendto(
        s: RawSocket,
        buf: *const c_void,
        len: BufLen,
        addr: *const SockAddrRaw,
        addrlen: SockLen,
    ) -> IoLen {
        libc::sendto(s, buf, len, 0, addr, addrlen)
    }

    pub unsafe fn recvfrom(
        s: RawSocket,
        buf: *mut c_void,
        len: BufLen,
        addr: *mut SockAddrRaw,
        addrlen: *mut SockLen,
    ) -> IoLen {
        libc::recvfrom(s, buf, len, 0, addr, addrlen)
    }

    pub unsafe fn listen(s: RawSocket, backlog: c_int) -> c_int {
        libc::listen(s, backlog)
    }

    pub unsafe fn shutdown(s: RawSocket, how: c_int) -> c_int {
        libc::shutdown(s, how)
    }
}

#[cfg(windows)]
mod imp {
    use std::ffi::{c_int, c_void};

    use entities_socket_platform::{BufLen, IoLen, RawSocket, SockAddrRaw, SockLen};
    use windows_sys::Win32::Networking::WinSock;

    pub unsafe fn socket(domain: c_int, ty: c_int, proto: c_int) -> RawSocket {
        WinSock::socket(domain, ty as _, proto)
    }

    pub unsafe fn close(s: RawSocket) -> c_int {
        WinSock::closesocket(s)
    }

    pub unsafe fn connect(s: RawSocket, addr: *const SockAddrRaw, addrlen: SockLen) -> c_int {
        WinSock::connect(s, addr, addrlen)
    }

    pub unsafe fn bind(s: RawSocket, addr: *const SockAddrRaw, addrlen: SockLen) -> c_int {
        WinSock::bind(s, addr, addrlen)
    }

    pub unsafe fn accept(s: RawSocket, addr: *mut SockAddrRaw, addrlen: *mut SockLen) -> RawSocket {
        WinSock::accept(s, addr, addrlen)
    }

    pub unsafe fn send(s: RawSocket, buf: *const c_void, len: BufLen) -> IoLen {
        WinSock::send(s, buf.cast(), len, 0)
    }

    pub unsafe fn recv(s: RawSocket, buf: *mut c_void, len: BufLen) -> IoLen {
        WinSock::recv(s, buf.cast(), len, 0)
    }

    pub unsafe fn sendto(
        s: RawSocket,
        buf: *const c_void,
        len: BufLen,
        addr: *const SockAddrRaw,
        addrlen: SockLen,
    ) -> IoLen {
        WinSock::sendto(s, buf.cast(), len, 0, addr, addrlen)
    }

    pub unsafe fn recvfrom(
        s: RawSocket,
        buf: *mut c_void,
        len: BufLen,
        addr: *mut SockAddrRaw,
        addrlen: *mut SockLen,
    ) -> IoLen {
        WinSock::recvfrom(s, buf.cast(), len, 0, addr, addrlen)
    }

    pub unsafe fn listen(s: RawSocket, backlog: c_int) -> c_int {
        WinSock::listen(s, backlog)
    }

    pub unsafe fn shutdown(s: RawSocket, how: c_int) -> c_int {
        WinSock::shutdown(s, how as _)
    }
}

pub use imp::*;

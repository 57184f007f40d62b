//! Integration tests for api_facades crate
//!
//! Drives a TCP conversation over loopback entirely through the C-signature
//! facades, and checks the safe re-exports line up with them.

use api_facades::*;

#[test]
fn test_init_cleanup() {
    assert_eq!(wratchet_init(), 0);
    wratchet_cleanup();
}

#[test]
fn test_reexported_guard() {
    let guard = NetworkGuard::acquire().unwrap();
    let socket = TcpSocket::new(AddressFamily::Ipv4).unwrap();
    assert_ne!(socket.raw_handle(), WRATCHET_INVALID_SOCKET);
    drop(socket);
    drop(guard);
}

#[cfg(unix)]
mod unix {
    use api_facades::*;
    use std::ffi::c_int;
    use std::mem;
    use std::thread;

    const SIN_LEN: c_int = mem::size_of::<libc::sockaddr_in>() as c_int;

    fn loopback(port: u16) -> libc::sockaddr_in {
        let mut sa: libc::sockaddr_in = unsafe { mem::zeroed() };
        sa.sin_family = libc::AF_INET as libc::sa_family_t;
        sa.sin_port = port.to_be();
        sa.sin_addr = libc::in_addr {
            s_addr: u32::from(std::net::Ipv4Addr::LOCALHOST).to_be(),
        };
        sa
    }

    fn as_sockaddr(sa: &libc::sockaddr_in) -> *const wratchet_sockaddr {
        (sa as *const libc::sockaddr_in).cast()
    }

    #[test]
    fn test_tcp_conversation() {
        assert_eq!(wratchet_init(), 0);

        let listener = wratchet_socket_create(libc::AF_INET, WRATCHET_STREAM, 0);
        assert_ne!(listener, WRATCHET_INVALID_SOCKET);
        unsafe {
            assert_eq!(wratchet_socket_bind(listener, as_sockaddr(&loopback(0)), SIN_LEN), 0);
            assert_eq!(wratchet_socket_listen(listener, 4), 0);
        }

        let mut name: libc::sockaddr_in = unsafe { mem::zeroed() };
        let mut name_len = SIN_LEN as libc::socklen_t;
        let rc = unsafe {
            libc::getsockname(listener, (&mut name as *mut libc::sockaddr_in).cast(), &mut name_len)
        };
        assert_eq!(rc, 0);
        let port = u16::from_be(name.sin_port);

        let client = thread::spawn(move || {
            let s = wratchet_socket_create(libc::AF_INET, WRATCHET_STREAM, 0);
            unsafe {
                assert_eq!(wratchet_socket_connect(s, as_sockaddr(&loopback(port)), SIN_LEN), 0);
                let msg = b"hello wratchet";
                assert_eq!(wratchet_socket_send(s, msg.as_ptr().cast(), msg.len() as c_int), msg.len() as c_int);
                assert_eq!(wratchet_socket_shutdown(s, WRATCHET_SHUT_SEND), 0);

                let mut reply = [0u8; 8];
                let n = wratchet_socket_recv(s, reply.as_mut_ptr().cast(), reply.len() as c_int);
                assert_eq!(&reply[..n as usize], b"ok");
                assert_eq!(wratchet_socket_destroy(s), 0);
            }
        });

        let mut peer: libc::sockaddr_in = unsafe { mem::zeroed() };
        let mut peer_len = SIN_LEN;
        let conn = unsafe {
            wratchet_socket_accept(listener, (&mut peer as *mut libc::sockaddr_in).cast(), &mut peer_len)
        };
        assert_ne!(conn, WRATCHET_INVALID_SOCKET);
        assert_eq!(peer_len, SIN_LEN);
        assert_eq!(peer.sin_family as c_int, libc::AF_INET);

        let mut buf = [0u8; 64];
        let mut total = 0usize;
        loop {
            let n = unsafe {
                wratchet_socket_recv(conn, buf[total..].as_mut_ptr().cast(), (buf.len() - total) as c_int)
            };
            assert!(n >= 0);
            if n == 0 {
                break;
            }
            total += n as usize;
        }
        assert_eq!(&buf[..total], b"hello wratchet");

        unsafe {
            assert_eq!(wratchet_socket_send(conn, b"ok".as_ptr().cast(), 2), 2);
            assert_eq!(wratchet_socket_destroy(conn), 0);
        }
        client.join().unwrap();

        unsafe {
            assert_eq!(wratchet_socket_destroy(listener), 0);
        }
        wratchet_cleanup();
    }

    #[test]
    fn test_accept_without_address() {
        let listener = wratchet_socket_create(libc::AF_INET, WRATCHET_STREAM, 0);
        unsafe {
            assert_eq!(wratchet_socket_bind(listener, as_sockaddr(&loopback(0)), SIN_LEN), 0);
            assert_eq!(wratchet_socket_listen(listener, 1), 0);
        }

        let mut name: libc::sockaddr_in = unsafe { mem::zeroed() };
        let mut name_len = SIN_LEN as libc::socklen_t;
        unsafe {
            libc::getsockname(listener, (&mut name as *mut libc::sockaddr_in).cast(), &mut name_len);
        }
        let addr = std::net::SocketAddr::from((std::net::Ipv4Addr::LOCALHOST, u16::from_be(name.sin_port)));
        let client = TcpSocket::connect_to(&addr).unwrap();

        let conn = unsafe { wratchet_socket_accept(listener, std::ptr::null_mut(), std::ptr::null_mut()) };
        assert_ne!(conn, WRATCHET_INVALID_SOCKET);

        client.close().unwrap();
        unsafe {
            assert_eq!(wratchet_socket_destroy(conn), 0);
            assert_eq!(wratchet_socket_destroy(listener), 0);
        }
    }

    #[test]
    fn test_destroy_invalid_handle() {
        let rc = unsafe { wratchet_socket_destroy(WRATCHET_INVALID_SOCKET) };
        assert_eq!(rc, -1);
        assert_eq!(ErrorCode::last(), ErrorCode::from_raw(libc::EBADF));
    }
}

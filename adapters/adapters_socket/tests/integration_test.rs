//! Integration tests for adapters_socket crate
//!
//! End-to-end workflows over loopback through the owned-socket API, plus the
//! raw forwarding layer working on handles the owned API created.

use adapters_socket::*;
use std::net::{Ipv4Addr, SocketAddr};
use std::thread;

fn loopback() -> SocketAddr {
    SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)
}

#[test]
fn test_tcp_request_response() {
    let listener = TcpSocket::listen_on(&loopback(), 4).unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (conn, peer) = listener.accept().unwrap();
        assert_eq!(peer.ip(), Ipv4Addr::LOCALHOST);
        let mut buf = [0u8; 16];
        let n = conn.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"request");
        conn.send(b"response").unwrap();
        conn.close().unwrap();
    });

    let client = TcpSocket::connect_to(&addr).unwrap();
    client.send(b"request").unwrap();
    client.shutdown(ShutdownHow::Send).unwrap();

    let mut buf = [0u8; 16];
    let mut total = 0;
    loop {
        let n = client.recv(&mut buf[total..]).unwrap();
        if n == 0 {
            break;
        }
        total += n;
    }
    assert_eq!(&buf[..total], b"response");
    server.join().unwrap();
}

#[test]
fn test_udp_exchange() {
    let a = UdpSocket::bound(&loopback()).unwrap();
    let b = UdpSocket::bound(&loopback()).unwrap();

    b.send_to(b"one", &a.local_addr().unwrap()).unwrap();
    b.send_to(b"two", &a.local_addr().unwrap()).unwrap();

    let mut buf = [0u8; 8];
    let (n, _) = a.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"one");
    let (n, from) = a.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"two");
    assert_eq!(from, b.local_addr().unwrap());
}

#[test]
#[cfg(unix)]
fn test_raw_send_on_owned_handles() {
    let a = UdpSocket::bound(&loopback()).unwrap();
    let b = UdpSocket::bound(&loopback()).unwrap();
    b.connect(&a.local_addr().unwrap()).unwrap();

    let msg = b"raw";
    let sent = unsafe { sys::send(b.raw_handle(), msg.as_ptr().cast(), msg.len()) };
    assert_eq!(sent, 3);

    let mut buf = [0u8; 8];
    let got = unsafe { sys::recv(a.raw_handle(), buf.as_mut_ptr().cast(), buf.len()) };
    assert_eq!(got, 3);
    assert_eq!(&buf[..3], msg);
}

#[test]
fn test_socket_error_is_std_error() {
    let err = TcpSocket::new(AddressFamily::Ipv4)
        .unwrap()
        .peer_addr()
        .unwrap_err();
    let boxed: Box<dyn std::error::Error> = Box::new(err.clone());
    assert!(boxed.to_string().starts_with("getpeername failed"));
    assert!(err.raw_os_error().is_some());
}

#[test]
fn test_enum_variants() {
    for family in [AddressFamily::Ipv4, AddressFamily::Ipv6] {
        let _ = format!("{:?}", family);
    }
    for socket_type in [SocketType::Stream, SocketType::Datagram] {
        let _ = format!("{:?}", socket_type);
    }
    for protocol in [Protocol::Default, Protocol::Tcp, Protocol::Udp] {
        let _ = format!("{:?}", protocol);
    }
}

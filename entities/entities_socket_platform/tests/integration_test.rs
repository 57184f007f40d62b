//! Integration tests for entities_socket_platform crate
//!
//! These tests check the platform aliases against the values a real socket
//! call produces.

use entities_socket_platform::*;

#[test]
fn test_error_code_matches_io_error() {
    let err = std::io::Error::from(ErrorCode::from_raw(ErrorCode::INVALID_ARGUMENT.raw()));
    assert_eq!(err.raw_os_error(), Some(ErrorCode::INVALID_ARGUMENT.raw()));
}

#[test]
#[cfg(unix)]
fn test_last_error_after_failed_close() {
    // Closing a descriptor that was never opened fails with EBADF
    let rc = unsafe { libc::close(INVALID_SOCKET) };
    assert_eq!(rc, SOCKET_ERROR);
    assert_eq!(ErrorCode::last(), ErrorCode::from_raw(libc::EBADF));
}

#[test]
fn test_length_helpers() {
    assert_eq!(sock_len(28), Some(28));
    assert_eq!(buf_len(64), Some(64));
}

#[test]
fn test_sockaddr_sizes_fit_in_sock_len() {
    let v4 = std::mem::size_of::<SockAddrInRaw>();
    let generic = std::mem::size_of::<SockAddrRaw>();
    assert_eq!(v4, generic);
    assert!(sock_len(v4 as i32).is_some());
}

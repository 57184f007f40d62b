//! Error Code Module
//!
//! Wraps the platform's socket error value: `errno` on POSIX systems and
//! `WSAGetLastError()` on Windows. Codes are carried unchanged; this module only
//! reads them, writes them back, and turns them into text.

use std::fmt;
use std::io;

#[cfg(unix)]
use nix::errno::Errno;

/// A platform socket error code
///
/// The value is exactly what the operating system reported. Zero means "no
/// error".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// No error
    pub const NONE: ErrorCode = ErrorCode(0);

    /// The platform's "invalid argument" code
    #[cfg(unix)]
    pub const INVALID_ARGUMENT: ErrorCode = ErrorCode(libc::EINVAL);
    #[cfg(windows)]
    pub const INVALID_ARGUMENT: ErrorCode =
        ErrorCode(windows_sys::Win32::Networking::WinSock::WSAEINVAL as i32);

    /// Wrap a raw platform code
    pub const fn from_raw(code: i32) -> Self {
        ErrorCode(code)
    }

    /// The raw platform code
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether this is the "no error" value
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Read the calling thread's last socket error
    ///
    /// Must be called before anything else that might overwrite it.
    #[cfg(unix)]
    pub fn last() -> Self {
        ErrorCode(Errno::last_raw())
    }

    #[cfg(windows)]
    pub fn last() -> Self {
        ErrorCode(unsafe { windows_sys::Win32::Networking::WinSock::WSAGetLastError() })
    }

    /// Write this code back as the calling thread's last socket error
    ///
    /// Used after printing or logging, either of which may clobber `errno`.
    #[cfg(unix)]
    pub fn restore(self) {
        Errno::set_raw(self.0);
    }

    #[cfg(windows)]
    pub fn restore(self) {
        unsafe { windows_sys::Win32::Networking::WinSock::WSASetLastError(self.0) }
    }

    /// Human-readable description of the code
    ///
    /// Uses `strerror_r` on POSIX systems and `FormatMessageW` on Windows.
    #[cfg(unix)]
    pub fn message(self) -> String {
        use std::ffi::CStr;

        let mut buf = [0 as libc::c_char; 256];
        // SAFETY: buf is writable for buf.len() bytes and strerror_r
        // NUL-terminates on success.
        let rc = unsafe { libc::strerror_r(self.0, buf.as_mut_ptr(), buf.len()) };
        if rc != 0 {
            return format!("Unknown error {}", self.0);
        }
        let msg = unsafe { CStr::from_ptr(buf.as_ptr()) };
        msg.to_string_lossy().into_owned()
    }

    #[cfg(windows)]
    pub fn message(self) -> String {
        use std::ptr;
        use windows_sys::Win32::System::Diagnostics::Debug::{
            FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
        };

        let mut buf = [0u16; 512];
        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                ptr::null(),
                self.0 as u32,
                0,
                buf.as_mut_ptr(),
                buf.len() as u32,
                ptr::null(),
            )
        };
        if len == 0 {
            return format!("Unknown error {}", self.0);
        }
        String::from_utf16_lossy(&buf[..len as usize])
            .trim_end()
            .to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for io::Error {
    fn from(code: ErrorCode) -> Self {
        io::Error::from_raw_os_error(code.0)
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        ErrorCode(code)
    }
}

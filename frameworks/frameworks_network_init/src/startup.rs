//! Startup Module
//!
//! `init` / `cleanup` and an RAII guard pairing them.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use adapters_error_reporting::{announce, ErrorReport, LogSink, ReportSink, StdoutSink};
use entities_socket_platform::ErrorCode;

/// Winsock version requested at startup: 2.2 (`MAKEWORD(2, 2)`)
pub const WINSOCK_VERSION: u16 = 0x0202;

static SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// Networking startup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitError {
    code: ErrorCode,
}

impl InitError {
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Winsock failed to initialize. Error Code : {}", self.code)
    }
}

impl std::error::Error for InitError {}

/// Whether this platform needs [`init`] before sockets can be used
pub const fn is_required() -> bool {
    cfg!(windows)
}

/// Number of successful [`init`] calls not yet matched by [`cleanup`]
pub fn active_sessions() -> usize {
    SESSIONS.load(Ordering::Acquire)
}

/// Start the platform networking subsystem
///
/// On Windows this calls `WSAStartup` requesting version 2.2. Calls may be
/// nested; each successful call must be paired with one [`cleanup`].
///
/// A startup failure is always printed to standard output and mirrored to
/// `log`, whatever the report mode.
pub fn init() -> Result<(), InitError> {
    start(platform_startup, &StdoutSink, &LogSink)
}

fn start(
    startup: fn() -> Result<(), ErrorCode>,
    stdout_sink: &dyn ReportSink,
    log_sink: &dyn ReportSink,
) -> Result<(), InitError> {
    startup().map_err(|code| {
        let report = ErrorReport::new("Winsock failed to initialize", code);
        announce(&report, stdout_sink, log_sink);
        InitError { code }
    })?;

    let sessions = SESSIONS.fetch_add(1, Ordering::AcqRel) + 1;
    log::debug!("network startup complete ({} active)", sessions);
    Ok(())
}

/// Tear down the platform networking subsystem
///
/// On Windows this calls `WSACleanup`. Calling it more often than [`init`]
/// succeeded is harmless.
pub fn cleanup() {
    platform_cleanup();

    let previous = SESSIONS
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        .unwrap_or(0);
    log::debug!("network cleanup ({} active)", previous.saturating_sub(1));
}

#[cfg(windows)]
fn platform_startup() -> Result<(), ErrorCode> {
    use windows_sys::Win32::Networking::WinSock::{WSAStartup, WSADATA};

    // SAFETY: WSADATA is plain old data; WSAStartup fills it in.
    let mut data: WSADATA = unsafe { std::mem::zeroed() };
    // WSAStartup returns its error directly; WSAGetLastError is not valid yet
    let rc = unsafe { WSAStartup(WINSOCK_VERSION, &mut data) };
    if rc != 0 {
        return Err(ErrorCode::from_raw(rc));
    }
    Ok(())
}

#[cfg(not(windows))]
fn platform_startup() -> Result<(), ErrorCode> {
    Ok(())
}

#[cfg(windows)]
fn platform_cleanup() {
    use windows_sys::Win32::Networking::WinSock::WSACleanup;

    if unsafe { WSACleanup() } != 0 {
        let code = ErrorCode::last();
        adapters_error_reporting::report_failure("WSACleanup", code);
    }
}

#[cfg(not(windows))]
fn platform_cleanup() {}

/// Keeps the networking subsystem started for its lifetime
///
/// ```rust
/// use frameworks_network_init::NetworkGuard;
///
/// let _net = NetworkGuard::acquire().expect("network startup");
/// // sockets may be used here
/// ```
#[derive(Debug)]
pub struct NetworkGuard {
    _private: (),
}

impl NetworkGuard {
    /// Run [`init`]; [`cleanup`] runs when the guard is dropped
    pub fn acquire() -> Result<Self, InitError> {
        init()?;
        Ok(Self { _private: () })
    }
}

impl Drop for NetworkGuard {
    fn drop(&mut self) {
        cleanup();
    }
}

//! Init Facades
//!
//! Startup, teardown and the console error diagnostic.

use std::borrow::Cow;
use std::ffi::{c_char, c_int, CStr};

use adapters_error_reporting::display_error;
use entities_socket_platform::ErrorCode;
use frameworks_network_init::{cleanup, init};

/// Start the platform networking subsystem
///
/// Returns 0 on success and -1 on failure. Only does anything on Windows.
#[no_mangle]
pub extern "C" fn wratchet_init() -> c_int {
    match init() {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("wratchet_init: {}", e);
            -1
        }
    }
}

/// Tear down the platform networking subsystem
#[no_mangle]
pub extern "C" fn wratchet_cleanup() {
    cleanup();
}

/// Print `str` followed by the last socket error code and its description
///
/// # Safety
///
/// `str` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn wratchet_display_error(str: *const c_char) {
    let code = ErrorCode::last();
    let context = if str.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(str).to_string_lossy()
    };
    code.restore();
    display_error(&context);
}

//! Frameworks Layer: Network Initialization
//!
//! Process-wide startup and teardown of the platform networking subsystem.
//! Only Windows needs it (`WSAStartup` / `WSACleanup`); on every other platform
//! both calls succeed without doing anything.

pub mod startup;

pub use startup::{active_sessions, cleanup, init, is_required, InitError, NetworkGuard, WINSOCK_VERSION};

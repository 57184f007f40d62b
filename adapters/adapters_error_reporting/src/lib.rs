//! Adapters Layer: Error Reporting
//!
//! Turns platform socket error codes into human-readable reports and decides
//! where those reports go.
//!
//! ## Overview
//!
//! - [`display_error`]: read the last socket error and print it, the classic
//!   console diagnostic
//! - [`announce`]: write a report to both sinks whatever the mode
//! - [`report_failure`]: report a failed call according to the configured
//!   [`ReportMode`]
//! - [`ReportSink`]: destination for reports; [`StdoutSink`] and [`LogSink`]
//!   are provided
//!
//! Reporting never changes the error the caller sees: the platform's
//! last-error value is written back after each report.

pub mod config;
pub mod report;

pub use config::{report_mode, set_report_mode, ParseReportModeError, ReportMode, REPORT_MODE_ENV};
pub use report::{
    announce, display_error, dispatch, report_failure, ErrorReport, LogSink, ReportSink, StdoutSink,
};

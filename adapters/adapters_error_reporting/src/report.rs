//! Error Report Module
//!
//! Formats a failed socket call into the console diagnostic
//!
//! ```text
//! <context>.
//! Error Code: <code>. Error String: <message>
//! ```
//!
//! and writes it to the configured sinks.

use std::fmt;

use entities_socket_platform::ErrorCode;

use crate::config::{report_mode, ReportMode};

/// A single failure report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    context: String,
    code: ErrorCode,
    message: String,
}

impl ErrorReport {
    /// Build a report, looking up the platform message for `code`
    pub fn new(context: impl Into<String>, code: ErrorCode) -> Self {
        Self::with_message(context, code, code.message())
    }

    /// Build a report with an explicit message
    pub fn with_message(
        context: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            code,
            message: message.into(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.\nError Code: {}. Error String: {}",
            self.context, self.code, self.message
        )
    }
}

/// Destination for failure reports
#[cfg_attr(test, mockall::automock)]
pub trait ReportSink {
    fn emit(&self, report: &ErrorReport);
}

/// Prints reports to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, report: &ErrorReport) {
        println!("{}", report);
    }
}

/// Forwards reports to the `log` facade at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn emit(&self, report: &ErrorReport) {
        log::error!(
            "{}: {} (os error {})",
            report.context(),
            report.message(),
            report.code()
        );
    }
}

/// Send `report` to the sinks selected by `mode`
pub fn dispatch(
    mode: ReportMode,
    report: &ErrorReport,
    stdout: &dyn ReportSink,
    log: &dyn ReportSink,
) {
    if mode.to_stdout() {
        stdout.emit(report);
    }
    if mode.to_log() {
        log.emit(report);
    }
}

/// Write `report` to both sinks regardless of the report mode
///
/// The report's code is written back as the thread's last socket error.
pub fn announce(report: &ErrorReport, stdout: &dyn ReportSink, log: &dyn ReportSink) {
    stdout.emit(report);
    log.emit(report);
    report.code().restore();
}

/// Report a failed socket call according to the current [`ReportMode`]
///
/// `code` is written back as the thread's last socket error afterwards, so
/// callers reading `errno` / `WSAGetLastError` still see it.
pub fn report_failure(operation: &str, code: ErrorCode) {
    let mode = report_mode();
    if mode == ReportMode::Silent {
        return;
    }

    let report = ErrorReport::new(operation, code);
    dispatch(mode, &report, &StdoutSink, &LogSink);
    code.restore();
}

/// Print the thread's last socket error with a caller-supplied context line
///
/// Always prints to standard output regardless of the report mode, and mirrors
/// the report to `log`. Returns the code that was printed; the last-error
/// value is left unchanged.
pub fn display_error(context: &str) -> ErrorCode {
    let code = ErrorCode::last();
    announce(&ErrorReport::new(context, code), &StdoutSink, &LogSink);
    code
}

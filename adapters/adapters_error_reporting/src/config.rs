//! Report Configuration Module
//!
//! Decides where failure reports go. The mode is process-global, read from the
//! `WRATCHET_ERROR_REPORT` environment variable on first use, and can be
//! changed at any time with [`set_report_mode`].

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable holding the initial report mode
pub const REPORT_MODE_ENV: &str = "WRATCHET_ERROR_REPORT";

const UNSET: u8 = u8::MAX;

static MODE: AtomicU8 = AtomicU8::new(UNSET);

/// Where failure reports are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ReportMode {
    /// Drop reports
    Silent = 0,
    /// Print to standard output
    Stdout = 1,
    /// Forward to the `log` facade at error level
    #[default]
    Log = 2,
    /// Standard output and `log`
    Both = 3,
}

impl ReportMode {
    /// Whether reports are printed to standard output
    pub fn to_stdout(self) -> bool {
        matches!(self, ReportMode::Stdout | ReportMode::Both)
    }

    /// Whether reports are forwarded to `log`
    pub fn to_log(self) -> bool {
        matches!(self, ReportMode::Log | ReportMode::Both)
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => ReportMode::Silent,
            1 => ReportMode::Stdout,
            3 => ReportMode::Both,
            _ => ReportMode::Log,
        }
    }

    /// Resolve a mode from an optional configuration value
    ///
    /// A missing value gives the default. An unparsable value gives the
    /// default and a warning.
    pub fn from_config_value(value: Option<&str>) -> Self {
        match value {
            None => ReportMode::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e: ParseReportModeError| {
                log::warn!("{}: {}; using {}", REPORT_MODE_ENV, e, ReportMode::default());
                ReportMode::default()
            }),
        }
    }

    /// Resolve the mode from `WRATCHET_ERROR_REPORT`
    pub fn from_env() -> Self {
        let value = env::var(REPORT_MODE_ENV).ok();
        Self::from_config_value(value.as_deref())
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportMode::Silent => "silent",
            ReportMode::Stdout => "stdout",
            ReportMode::Log => "log",
            ReportMode::Both => "both",
        };
        f.write_str(name)
    }
}

/// Unrecognized report mode string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReportModeError(String);

impl fmt::Display for ParseReportModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown report mode {:?}", self.0)
    }
}

impl std::error::Error for ParseReportModeError {}

impl FromStr for ReportMode {
    type Err = ParseReportModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "silent" | "none" | "0" => Ok(ReportMode::Silent),
            "stdout" | "console" => Ok(ReportMode::Stdout),
            "log" => Ok(ReportMode::Log),
            "both" | "all" => Ok(ReportMode::Both),
            _ => Err(ParseReportModeError(s.to_string())),
        }
    }
}

/// The current report mode
///
/// The first call reads `WRATCHET_ERROR_REPORT` unless [`set_report_mode`]
/// already ran.
pub fn report_mode() -> ReportMode {
    let raw = MODE.load(Ordering::Acquire);
    if raw != UNSET {
        return ReportMode::from_u8(raw);
    }

    let mode = ReportMode::from_env();
    match MODE.compare_exchange(UNSET, mode as u8, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => mode,
        Err(current) => ReportMode::from_u8(current),
    }
}

/// Replace the report mode for the whole process
pub fn set_report_mode(mode: ReportMode) {
    MODE.store(mode as u8, Ordering::Release);
}

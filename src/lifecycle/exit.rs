//! Process exit codes.
//!
//! Codes 5 to 7 were used for page templates and stay unassigned.

use std::fmt;
use std::process::ExitCode as ProcessExitCode;

/// Exit status of the `https-redirect` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// Service configuration unreadable or invalid.
    ConfigError = 1,
    /// The server failed while running.
    ExecutionFailure = 2,
    /// Command-line usage error.
    AppDevError = 3,
    /// The listener address could not be bound.
    BadPort = 4,
    /// The mapping file failed to load.
    BadMappingFile = 8,
    InvalidLogLevel = 9,
    /// The metrics exporter could not be installed.
    MetricsIssue = 10,
    /// `lookup` found no redirect.
    NoRedirect = 11,
}

impl ExitCode {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Every code, in numeric order.
    pub const ALL: [ExitCode; 9] = [
        ExitCode::Success,
        ExitCode::ConfigError,
        ExitCode::ExecutionFailure,
        ExitCode::AppDevError,
        ExitCode::BadPort,
        ExitCode::BadMappingFile,
        ExitCode::InvalidLogLevel,
        ExitCode::MetricsIssue,
        ExitCode::NoRedirect,
    ];
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

impl From<ExitCode> for ProcessExitCode {
    fn from(code: ExitCode) -> Self {
        ProcessExitCode::from(code.code())
    }
}

//! Centralized exit code definitions for the batch binary.
//!
//! The facility produces exactly two process outcomes: success, and the
//! fatal path's fixed status 1. Keeping the mapping in one enum ensures the
//! binary and the fatal handler can never drift apart.

use std::fmt;

/// Exit codes produced by the ephemeris batch binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,

    /// Fatal termination.
    ///
    /// Every fatal diagnostic, including a log sink that cannot be opened
    /// and any short read in the numerical pipeline, exits with this
    /// status.
    Fatal = 1,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a human-readable description of this exit code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Fatal => "fatal error",
        }
    }

    /// Returns `true` if this represents a successful exit.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Creates an exit code from an i32 value.
    ///
    /// Returns `None` if the value doesn't correspond to a known exit code.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        // Clamp to u8 range for std::process::ExitCode
        let value = code.as_i32().clamp(0, 255) as u8;
        Self::from(value)
    }
}

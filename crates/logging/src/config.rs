//! Reporter configuration.

use std::path::PathBuf;

/// Fixed relative name of the durable log file.
///
/// The facility chooses this name itself; there is no runtime sink
/// configuration beyond the embedding override in [`ReporterConfig`].
pub const LOG_FILE_NAME: &str = "ephem.log";

/// Configuration for a [`Reporter`](crate::Reporter).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReporterConfig {
    /// Mirror recoverable diagnostics (error, warning, report) into the
    /// durable log. Fatal diagnostics are mirrored regardless.
    pub debug: bool,
    /// Log destination override used by embedders and the test suite;
    /// `None` selects [`LOG_FILE_NAME`] relative to the working directory.
    pub log_file: Option<PathBuf>,
}

impl ReporterConfig {
    /// Sets whether recoverable diagnostics are mirrored into the log.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the effective log destination.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
    }
}

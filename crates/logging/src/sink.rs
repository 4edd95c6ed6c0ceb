//! Durable log sink: lazily-opened append destination with a reentrancy
//! latch.

use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use core::message_source;

use crate::reporter::fatal_sequence;
use crate::timestamp;

/// Diagnostic emitted when the log destination cannot be opened.
pub(crate) const LOG_OPEN_FAILURE_TEXT: &str = "Could not open log file to write.";

/// Process-lifetime state of the durable log destination.
///
/// The handle transitions unopened to open on first use and is never
/// closed explicitly; process teardown releases it. The latch marks a
/// write in progress so nested write attempts (in particular the fatal
/// path triggered by an open failure) become silent no-ops instead of
/// recursion.
pub(crate) struct LogSink {
    path: PathBuf,
    file: Option<LineWriter<File>>,
    latch: bool,
}

impl LogSink {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: None,
            latch: false,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one timestamped line, opening the destination on first use.
    ///
    /// Returns silently without writing when a write is already in
    /// progress. An open failure escalates through the fatal path exactly
    /// once; the latch stays set for that entire handling, so the fatal
    /// path's own sink mirror cannot trigger a second open attempt.
    pub(crate) fn write_line(&mut self, text: &str, debug: bool) {
        if self.latch {
            return;
        }
        self.latch = true;

        if self.file.is_none() {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                // Line-buffered so the file reflects every accepted
                // message even if the process is later killed.
                Ok(file) => self.file = Some(LineWriter::new(file)),
                Err(_) => fatal_sequence(self, message_source!(), LOG_OPEN_FAILURE_TEXT, debug),
            }
        }

        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "[{}] {}", timestamp::now_string(), text);
        }

        self.latch = false;
    }
}

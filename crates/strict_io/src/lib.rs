#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `strict_io` wraps sequential byte sources for the numerical pipeline.
//! The surrounding ephemeris computation has no defined behavior for
//! partial input, so every read here is all-or-nothing: a short read or
//! I/O error escalates straight to the fatal path and the process exits
//! with status 1. No partial-read indication is ever returned to a caller.
//!
//! # Examples
//!
//! ```no_run
//! use std::fs::File;
//! use logging::{ReporterConfig, shared};
//! use strict_io::GuardedReader;
//!
//! let reporter = shared(ReporterConfig::default());
//! let file = File::open("data/de430.bin").expect("ephemeris present");
//! let mut reader = GuardedReader::new(file, reporter);
//! let coefficients = reader.read_f64_array(826);
//! assert_eq!(coefficients.len(), 826);
//! ```

use std::io::Read;

use core::message_source;
use logging::{Reporter, SharedReporter};

/// Fixed diagnostic for any guarded read that comes up short.
const READ_FAILURE_TEXT: &str = "file read fail";

/// Fills `destination` from `source`, treating any shortfall as fatal.
pub fn read_exact_or_fatal<R: Read>(reporter: &mut Reporter, source: &mut R, destination: &mut [u8]) {
    if source.read_exact(destination).is_err() {
        reporter.fatal(message_source!(), READ_FAILURE_TEXT);
    }
}

/// Reads exactly `element_count` elements of `element_size` bytes.
///
/// Returns the filled buffer; on end of input or I/O error before the full
/// byte count arrives, the fatal path runs instead and nothing returns.
#[must_use]
pub fn read_elements<R: Read>(
    reporter: &mut Reporter,
    source: &mut R,
    element_size: usize,
    element_count: usize,
) -> Vec<u8> {
    let Some(total) = element_size.checked_mul(element_count) else {
        reporter.fatal(message_source!(), READ_FAILURE_TEXT);
    };
    let mut buffer = vec![0u8; total];
    read_exact_or_fatal(reporter, source, &mut buffer);
    buffer
}

/// Sequential byte source whose reads are all-or-nothing.
///
/// Carries the shared reporter so call sites in the numerical pipeline do
/// not thread a reporter borrow through every read.
pub struct GuardedReader<R> {
    source: R,
    reporter: SharedReporter,
}

impl<R: Read> GuardedReader<R> {
    /// Wraps `source`, escalating failed reads through `reporter`.
    #[must_use]
    pub fn new(source: R, reporter: SharedReporter) -> Self {
        Self { source, reporter }
    }

    /// Fills `destination` completely or terminates the process.
    pub fn read_exact_into(&mut self, destination: &mut [u8]) {
        if self.source.read_exact(destination).is_err() {
            escalate(&self.reporter);
        }
    }

    /// Reads exactly `element_count` elements of `element_size` bytes.
    #[must_use]
    pub fn read_elements(&mut self, element_size: usize, element_count: usize) -> Vec<u8> {
        let Some(total) = element_size.checked_mul(element_count) else {
            escalate(&self.reporter);
        };
        let mut buffer = vec![0u8; total];
        self.read_exact_into(&mut buffer);
        buffer
    }

    /// Reads `count` little-endian binary doubles.
    #[must_use]
    pub fn read_f64_array(&mut self, count: usize) -> Vec<f64> {
        let bytes = self.read_elements(8, count);
        let mut values = Vec::with_capacity(count);
        for chunk in bytes.chunks_exact(8) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            values.push(f64::from_le_bytes(raw));
        }
        values
    }

    /// Consumes the wrapper and returns the underlying source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }
}

fn escalate(reporter: &SharedReporter) -> ! {
    match reporter.lock() {
        Ok(mut guard) => guard.fatal(message_source!(), READ_FAILURE_TEXT),
        Err(poisoned) => poisoned
            .into_inner()
            .fatal(message_source!(), READ_FAILURE_TEXT),
    }
}

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the diagnostic reporting facility of the ephemeris batch
//! computer. It classifies outgoing messages by severity, renders them to
//! the appropriate human-facing stream, mirrors a subset into a durable
//! timestamped log, and owns the single sanctioned path for fatal
//! termination.
//!
//! # Design
//!
//! All state lives in one [`Reporter`]: the debug-mode configuration, a
//! reusable [`core::message::MessageScratch`] render buffer, and the log
//! sink (lazily opened handle plus reentrancy latch). Every mutation goes
//! through its methods, so a multi-threaded embedder only has to guard one
//! object; [`SharedReporter`] packages exactly that as an
//! `Arc<Mutex<Reporter>>`.
//!
//! # Invariants
//!
//! - The log sink opens its destination at most once per process, in
//!   append/create mode, with line-oriented flushing.
//! - A sink write never re-enters itself: the latch turns nested write
//!   attempts into silent no-ops, which is what keeps the sink's own
//!   open-failure handling from recursing.
//! - [`Reporter::fatal`] never returns; the process exits with status 1
//!   regardless of which reporting paths succeeded, and the fatal lines
//!   are mirrored to the log independent of debug mode.
//!
//! # Errors
//!
//! Recoverable emitters always return normally after performing their side
//! effects; stream and sink write errors after a successful open are
//! swallowed. The only escalation is the sink open failure, which takes
//! the fatal path.
//!
//! # Examples
//!
//! ```no_run
//! use logging::{Reporter, ReporterConfig};
//!
//! let mut reporter = Reporter::new(ReporterConfig::default());
//! reporter.report("sunrise");
//! reporter.warning("ephemeris span clipped to data coverage");
//! ```

mod config;
mod reporter;
mod sink;
mod timestamp;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{LOG_FILE_NAME, ReporterConfig};
pub use reporter::{Reporter, SharedReporter, global, init_global, shared};
pub use timestamp::format_log_timestamp;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{ReporterLayer, init_tracing};

// Re-exported so `fatal!` expansions can capture the call site without the
// caller depending on `core` directly.
pub use core::message_source;

/// Reports a fatal condition tagged with the calling file and line, then
/// terminates the process with status 1.
///
/// The first argument is a [`Reporter`] (or any expression with a `fatal`
/// method of the same shape); the rest is a `format!` argument list.
#[macro_export]
macro_rules! fatal {
    ($reporter:expr, $($arg:tt)*) => {{
        let text = ::std::format!($($arg)*);
        $reporter.fatal($crate::message_source!(), &text)
    }};
}

//! The reporter: severity emitters and the fatal path.

use std::io::{self, Write};
use std::process;
use std::sync::{Arc, Mutex, OnceLock};

use core::exit_code::ExitCode;
use core::message::{LONG_TEXT_CAPACITY, truncate_to_boundary};
use core::message::{Message, MessageScratch, Severity, SourceLocation};
use core::message_source;

use crate::config::ReporterConfig;
use crate::sink::LogSink;

/// Process-wide diagnostic reporter.
///
/// One instance owns every piece of mutable reporting state: the
/// debug-mode configuration, the reusable render scratch, and the log
/// sink with its reentrancy latch. Construct it once at process start and
/// route all diagnostics through it.
pub struct Reporter {
    config: ReporterConfig,
    scratch: MessageScratch,
    sink: LogSink,
}

impl Reporter {
    /// Creates a reporter from the supplied configuration.
    ///
    /// The log destination is not opened here; the sink opens it lazily
    /// on the first accepted line.
    #[must_use]
    pub fn new(config: ReporterConfig) -> Self {
        let sink = LogSink::new(config.log_path());
        Self {
            config,
            scratch: MessageScratch::new(),
            sink,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Reports a problem on stderr; execution continues.
    pub fn error(&mut self, text: &str) {
        self.emit(&Message::error(text.to_owned()));
    }

    /// Reports an advisory on stderr; execution continues.
    pub fn warning(&mut self, text: &str) {
        self.emit(&Message::warning(text.to_owned()));
    }

    /// Reports informational output on stdout.
    pub fn report(&mut self, text: &str) {
        self.emit(&Message::report(text.to_owned()));
    }

    /// Writes a line to the durable log only.
    pub fn log(&mut self, text: &str) {
        self.emit(&Message::log_only(text.to_owned()));
    }

    /// Dispatches a structured message to its destinations.
    ///
    /// Recoverable severities return normally after their side effects;
    /// a [`Severity::Fatal`] message diverges through [`Self::fatal`].
    pub fn emit(&mut self, message: &Message) {
        match message.severity() {
            Severity::Error | Severity::Warning | Severity::Report => {
                self.emit_to_stream(message);
                if self.config.debug {
                    self.mirror_to_log(message);
                }
            }
            Severity::LogOnly => self.mirror_to_log(message),
            Severity::Fatal => {
                let location = message
                    .source()
                    .cloned()
                    .unwrap_or_else(|| message_source!());
                self.fatal(location, message.text())
            }
        }
    }

    /// Reports a fatal condition and terminates the process with status 1.
    ///
    /// Two error-severity lines are emitted: a location line naming the
    /// call site, then the message itself. Both are mirrored to the log
    /// regardless of debug mode; debug mode adds a terminal marker line.
    /// This never returns to its caller under any circumstance.
    pub fn fatal(&mut self, location: SourceLocation, text: &str) -> ! {
        fatal_sequence(&mut self.sink, location, text, self.config.debug)
    }

    fn emit_to_stream(&mut self, message: &Message) {
        let line = message.render_stream_line(&mut self.scratch);
        if message.severity().uses_stderr() {
            let _ = io::stderr().lock().write_all(line.as_bytes());
        } else {
            let mut handle = io::stdout().lock();
            let _ = handle.write_all(line.as_bytes());
            let _ = handle.flush();
        }
    }

    fn mirror_to_log(&mut self, message: &Message) {
        let line = message.render_log_line(&mut self.scratch);
        self.sink.write_line(line, self.config.debug);
    }
}

/// Composes the fatal sequence from its formatting and dispatch steps.
///
/// Kept as a free function over the sink so the sink's own open-failure
/// handling can take the identical path while its latch is still set,
/// making the nested sink mirrors no-ops.
pub(crate) fn fatal_sequence(
    sink: &mut LogSink,
    location: SourceLocation,
    text: &str,
    debug: bool,
) -> ! {
    let text = truncate_to_boundary(text, LONG_TEXT_CAPACITY);
    let intro = format!(
        "Fatal Error encountered in {} at line {}:",
        location.path(),
        location.line()
    );
    emit_fatal_line(sink, &intro, debug);
    emit_fatal_line(sink, text, debug);
    if debug {
        sink.write_line("Terminating with error condition 1.", debug);
    }
    process::exit(ExitCode::Fatal.as_i32());
}

fn emit_fatal_line(sink: &mut LogSink, line: &str, debug: bool) {
    let _ = writeln!(io::stderr().lock(), "Error: {line}");
    // Fatal diagnostics are durably recorded independent of debug mode.
    sink.write_line(&format!("Error: {line}"), debug);
}

/// Shared, lockable handle to a [`Reporter`].
pub type SharedReporter = Arc<Mutex<Reporter>>;

/// Wraps a freshly constructed reporter for shared use across call sites.
#[must_use]
pub fn shared(config: ReporterConfig) -> SharedReporter {
    Arc::new(Mutex::new(Reporter::new(config)))
}

static GLOBAL: OnceLock<SharedReporter> = OnceLock::new();

/// Returns the process-wide reporter, initializing it with `config` on
/// first call. Later calls return the existing instance unchanged.
pub fn init_global(config: ReporterConfig) -> &'static SharedReporter {
    GLOBAL.get_or_init(|| shared(config))
}

/// Returns the process-wide reporter, initializing it with default
/// configuration when [`init_global`] has not run.
pub fn global() -> &'static SharedReporter {
    GLOBAL.get_or_init(|| shared(ReporterConfig::default()))
}

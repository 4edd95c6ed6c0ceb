use std::borrow::Cow;
use std::fmt;

/// Maximum size in bytes of a short field value such as a file name or an
/// epoch label.
pub const SHORT_TEXT_CAPACITY: usize = 4096;

/// Maximum size in bytes of a free-text diagnostic payload.
pub const LONG_TEXT_CAPACITY: usize = 32768;

/// Severity of a user-visible diagnostic.
///
/// The set is fixed: the facility is not a general logging framework, and
/// destinations and formats are keyed directly off this enumeration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Severity {
    /// Problem surfaced on stderr; execution continues.
    Error,
    /// Advisory surfaced on stderr; execution continues.
    Warning,
    /// Informational output surfaced on stdout.
    Report,
    /// Unrecoverable condition; terminates the process with status 1.
    Fatal,
    /// Written only to the durable log, never to a user-facing stream.
    LogOnly,
}

impl Severity {
    /// Prefix used when rendering to the user-facing stream, if any.
    ///
    /// `Report` and `LogOnly` lines carry no stream prefix; fatal
    /// diagnostics are rendered through the error format.
    #[must_use]
    pub const fn stream_prefix(self) -> Option<&'static str> {
        match self {
            Self::Error | Self::Fatal => Some("Error"),
            Self::Warning => Some("Warning"),
            Self::Report | Self::LogOnly => None,
        }
    }

    /// Prefix used when mirroring into the durable log, if any.
    #[must_use]
    pub const fn log_prefix(self) -> Option<&'static str> {
        match self {
            Self::Error | Self::Fatal => Some("Error"),
            Self::Warning => Some("Warning"),
            Self::Report => Some("Reporting"),
            Self::LogOnly => None,
        }
    }

    /// Returns `true` for severities that are delivered on stderr.
    #[must_use]
    pub const fn uses_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warning | Self::Fatal)
    }
}

/// Source location associated with a fatal diagnostic.
///
/// Captured at the call site by [`message_source!`](crate::message_source)
/// so every fatal report names the file and line that raised it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceLocation {
    path: Cow<'static, str>,
    line: u32,
}

impl SourceLocation {
    /// Creates a source location from a `file!()`/`line!()` pair.
    #[must_use]
    pub const fn from_parts(path: &'static str, line: u32) -> Self {
        Self {
            path: Cow::Borrowed(path),
            line,
        }
    }

    /// Returns the source path recorded for the diagnostic.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the line number recorded for the diagnostic.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// Macro helper that captures the current source location.
#[macro_export]
macro_rules! message_source {
    () => {
        $crate::message::SourceLocation::from_parts(file!(), line!())
    };
}

/// Returns the longest prefix of `text` that fits in `capacity` bytes
/// without splitting a UTF-8 character.
#[must_use]
pub fn truncate_to_boundary(text: &str, capacity: usize) -> &str {
    if text.len() <= capacity {
        return text;
    }
    let mut end = capacity;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Owned text value with an explicit capacity class.
///
/// Construction copies the input, truncating it to the class capacity. The
/// stored value owns its allocation, so a `BoundedText` can be handed back
/// to the facility that produced it without any storage overlap.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BoundedText {
    text: String,
}

impl BoundedText {
    /// Creates a short-field value, truncated to [`SHORT_TEXT_CAPACITY`].
    #[must_use]
    pub fn short<T: AsRef<str>>(text: T) -> Self {
        Self::bounded(text.as_ref(), SHORT_TEXT_CAPACITY)
    }

    /// Creates a free-text value, truncated to [`LONG_TEXT_CAPACITY`].
    #[must_use]
    pub fn long<T: AsRef<str>>(text: T) -> Self {
        Self::bounded(text.as_ref(), LONG_TEXT_CAPACITY)
    }

    fn bounded(text: &str, capacity: usize) -> Self {
        Self {
            text: truncate_to_boundary(text, capacity).to_owned(),
        }
    }

    /// Returns the stored text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the value and returns the owned text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns the stored length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` when no text is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Structured representation of one diagnostic message.
///
/// The payload is clamped to [`LONG_TEXT_CAPACITY`] at construction, so a
/// message can always be rendered into fixed-size downstream storage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    severity: Severity,
    text: Cow<'static, str>,
    source: Option<SourceLocation>,
}

impl Message {
    fn new<T: Into<Cow<'static, str>>>(severity: Severity, text: T) -> Self {
        let text = clamp_cow(text.into());
        Self {
            severity,
            text,
            source: None,
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self::new(Severity::Error, text)
    }

    /// Creates a warning message.
    #[must_use]
    pub fn warning<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self::new(Severity::Warning, text)
    }

    /// Creates an informational report message.
    #[must_use]
    pub fn report<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self::new(Severity::Report, text)
    }

    /// Creates a message destined only for the durable log.
    #[must_use]
    pub fn log_only<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self::new(Severity::LogOnly, text)
    }

    /// Creates a fatal message.
    #[must_use]
    pub fn fatal<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self::new(Severity::Fatal, text)
    }

    /// Returns the message severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message payload text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the recorded source location, if any.
    #[must_use]
    pub fn source(&self) -> Option<&SourceLocation> {
        self.source.as_ref()
    }

    /// Attaches a source location to the message.
    #[must_use]
    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    /// Renders the stream form of the message (trailing newline included)
    /// into the supplied scratch buffer and returns the rendered line.
    pub fn render_stream_line<'a>(&self, scratch: &'a mut MessageScratch) -> &'a str {
        scratch.line.clear();
        if let Some(prefix) = self.severity.stream_prefix() {
            scratch.line.push_str(prefix);
            scratch.line.push_str(": ");
        }
        scratch.line.push_str(&self.text);
        scratch.line.push('\n');
        &scratch.line
    }

    /// Renders the log form of the message (no newline, no timestamp) into
    /// the supplied scratch buffer and returns the rendered line.
    pub fn render_log_line<'a>(&self, scratch: &'a mut MessageScratch) -> &'a str {
        scratch.line.clear();
        if let Some(prefix) = self.severity.log_prefix() {
            scratch.line.push_str(prefix);
            scratch.line.push_str(": ");
        }
        scratch.line.push_str(&self.text);
        &scratch.line
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.severity.stream_prefix() {
            write!(f, "{prefix}: ")?;
        }
        f.write_str(&self.text)
    }
}

fn clamp_cow(text: Cow<'static, str>) -> Cow<'static, str> {
    if text.len() <= LONG_TEXT_CAPACITY {
        return text;
    }
    match text {
        Cow::Borrowed(value) => Cow::Borrowed(truncate_to_boundary(value, LONG_TEXT_CAPACITY)),
        Cow::Owned(mut value) => {
            let end = truncate_to_boundary(&value, LONG_TEXT_CAPACITY).len();
            value.truncate(end);
            Cow::Owned(value)
        }
    }
}

/// Reusable render buffer for message lines.
///
/// One scratch instance is kept alive for the duration of a logging session
/// so repeated writes reuse the same allocation instead of zeroing fresh
/// storage for every diagnostic.
#[derive(Clone, Debug, Default)]
pub struct MessageScratch {
    line: String,
}

impl MessageScratch {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently rendered line.
    #[must_use]
    pub fn last_rendered(&self) -> &str {
        &self.line
    }
}

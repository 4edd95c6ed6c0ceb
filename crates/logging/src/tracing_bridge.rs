//! Bridge between the tracing crate and the severity emitters.
//!
//! Embedders that instrument with standard tracing macros can route those
//! events through the reporter, so `tracing::error!` lands on stderr and in
//! the durable log exactly like a direct [`Reporter::error`] call.
//!
//! [`Reporter::error`]: crate::Reporter::error

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::reporter::SharedReporter;

/// A tracing layer that forwards events to a shared reporter.
///
/// Levels map onto the facility's severities: `ERROR` becomes an error,
/// `WARN` a warning, `INFO` a report, and `DEBUG`/`TRACE` go to the
/// durable log only.
pub struct ReporterLayer {
    reporter: SharedReporter,
}

impl ReporterLayer {
    /// Creates a layer that forwards events to `reporter`.
    #[must_use]
    pub fn new(reporter: SharedReporter) -> Self {
        Self { reporter }
    }
}

impl<S> Layer<S> for ReporterLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if visitor.message.is_empty() {
            return;
        }

        let Ok(mut reporter) = self.reporter.lock() else {
            return;
        };
        let level = *event.metadata().level();
        if level == Level::ERROR {
            reporter.error(&visitor.message);
        } else if level == Level::WARN {
            reporter.warning(&visitor.message);
        } else if level == Level::INFO {
            reporter.report(&visitor.message);
        } else {
            reporter.log(&visitor.message);
        }
    }
}

/// Collects the `message` field of a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        }
    }
}

/// Installs a global tracing subscriber that forwards events to `reporter`.
pub fn init_tracing(reporter: SharedReporter) {
    tracing_subscriber::registry()
        .with(ReporterLayer::new(reporter))
        .init();
}

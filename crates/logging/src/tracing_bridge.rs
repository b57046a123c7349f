//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and a [`Logger`].
//!
//! [`LoggerLayer`] is a tracing-subscriber layer that turns every event into a
//! logger record, so diagnostics from libraries using `tracing` pass through
//! the same threshold and journal as first-party calls.
//!
//! | tracing level    | severity                      |
//! |------------------|-------------------------------|
//! | `TRACE`, `DEBUG` | [`Severity::Debug`]           |
//! | `INFO`           | [`Severity::Informational`]   |
//! | `WARN`, `ERROR`  | [`Severity::Warning`]         |
//!
//! `ERROR` stops at Warning: a library event never terminates the process.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{Logger, init_tracing};
//!
//! init_tracing(Logger::new());
//! tracing::warn!(target: "cache", "evicting {} entries", 12);
//! ```

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::entry::Entry;
use crate::levels::Severity;
use crate::logger::Logger;

/// A tracing layer that records events on a [`Logger`].
#[derive(Clone, Debug)]
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    /// Creates a layer forwarding into `logger`.
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Maps a tracing level onto a severity.
    pub const fn severity_for(level: &Level) -> Severity {
        match *level {
            Level::TRACE | Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Informational,
            Level::WARN | Level::ERROR => Severity::Warning,
        }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(text) = visitor.finish() else {
            return;
        };
        let severity = Self::severity_for(event.metadata().level());
        self.logger.log_at(severity, Entry::plain(text));
    }
}

/// Collects the `message` field; other fields are ignored.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl MessageVisitor {
    fn finish(self) -> Option<String> {
        self.message
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber that forwards events into `logger`.
///
/// The `RUST_LOG` environment variable filters events; without it every
/// event at `DEBUG` or above is forwarded and the logger's own threshold
/// decides what reaches the display. Does nothing if a global subscriber is
/// already installed.
pub fn init_tracing(logger: Logger) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .try_init();
}

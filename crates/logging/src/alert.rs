//! crates/logging/src/alert.rs
//! Alert channel for conditions an operator must see.
//!
//! Alerts go to stderr by default, prefixed with `ALERT `, stamped in UTC and
//! attributed to the calling source location so a failure can be traced back
//! without a debugger.

use std::error::Error;
use std::io;
use std::panic::Location;
use std::process;
use std::sync::OnceLock;

use logging_sink::{CallerStyle, SharedSink, Stamp};

use crate::entry::Entry;
use crate::logger::FAILURE_EXIT_CODE;
use crate::registry::{RegisteredWriter, SinkRegistry};

/// Line prefix for every alert.
pub const ALERT_PREFIX: &str = "ALERT ";

/// Header printed by [`AlertLog::abort`].
pub const ABORT_HEADER: &str = "Aborting program execution due to error(s):";

/// Alert logger.
#[derive(Debug)]
pub struct AlertLog {
    registry: SinkRegistry,
    located: RegisteredWriter,
    plain: RegisteredWriter,
}

impl AlertLog {
    /// Creates an alert log writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        let registry =
            SinkRegistry::new(sink, ALERT_PREFIX, Stamp::Utc).with_caller(CallerStyle::Long);
        let located = registry.register("");
        let plain = registry.register("");
        Self {
            registry,
            located,
            plain,
        }
    }

    /// Writes an alert attributed to the caller.
    #[track_caller]
    pub fn warn(&self, entry: impl Into<Entry>) {
        let _ = self
            .located
            .output_at(Some(Location::caller()), &entry.into().render());
    }

    /// Writes an alert, then terminates the process with status 1.
    #[track_caller]
    pub fn fatal(&self, entry: impl Into<Entry>) -> ! {
        self.warn(entry);
        let _ = self.flush();
        process::exit(FAILURE_EXIT_CODE)
    }

    /// Writes `error` and its source chain, then terminates the process.
    ///
    /// The caller location is omitted: the error chain already says where
    /// things went wrong.
    pub fn abort(&self, error: &dyn Error) -> ! {
        let _ = self.plain.output(&abort_report(error));
        let _ = self.flush();
        process::exit(FAILURE_EXIT_CODE)
    }

    /// Redirects alerts and every writer issued by this log.
    pub fn set_output(&self, sink: SharedSink) {
        self.registry.redirect(sink);
    }

    /// Returns the current output sink.
    pub fn output(&self) -> SharedSink {
        self.registry.current()
    }

    /// Returns a writer that emits alerts and follows `set_output`.
    pub fn writer(&self, label: impl Into<String>) -> RegisteredWriter {
        self.registry.register(label)
    }

    /// Flushes the current sink.
    pub fn flush(&self) -> io::Result<()> {
        self.registry.current().flush()
    }
}

/// Renders the report printed by [`AlertLog::abort`].
pub fn abort_report(error: &dyn Error) -> String {
    let mut report = format!("{ABORT_HEADER}\n{error}");
    let mut source = error.source();
    while let Some(cause) = source {
        report.push_str("\n  caused by: ");
        report.push_str(&cause.to_string());
        source = cause.source();
    }
    report
}

/// Returns the process-wide alert log (stderr until redirected).
pub fn standard() -> &'static AlertLog {
    static STANDARD: OnceLock<AlertLog> = OnceLock::new();
    STANDARD.get_or_init(|| AlertLog::new(SharedSink::stderr()))
}

/// Writes an alert on the process-wide alert log.
#[track_caller]
pub fn warn(entry: impl Into<Entry>) {
    standard().warn(entry);
}

/// Writes an alert on the process-wide alert log and exits.
#[track_caller]
pub fn fatal(entry: impl Into<Entry>) -> ! {
    standard().fatal(entry)
}

/// Prints `error` with its causes on the process-wide alert log and exits.
pub fn abort(error: &dyn Error) -> ! {
    standard().abort(error)
}

/// Redirects the process-wide alert log.
pub fn set_output(sink: SharedSink) {
    standard().set_output(sink);
}

/// Returns a writer on the process-wide alert log.
pub fn writer(label: impl Into<String>) -> RegisteredWriter {
    standard().writer(label)
}

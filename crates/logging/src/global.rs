//! crates/logging/src/global.rs
//! Process-wide default logger and shared-sink registry.
//!
//! The default [`Logger`] is built lazily on first use and can be replaced
//! with [`set_standard`]. The free functions here only forward to it.

use std::sync::{OnceLock, PoisonError, RwLock};

use logging_sink::{SharedSink, SinkResult, SinkTarget, Stamp};

use crate::entry::Entry;
use crate::levels::Severity;
use crate::logger::Logger;
use crate::registry::{RegisteredWriter, SinkRegistry};
use crate::writer::LogWriter;
use crate::{alert, audit};

fn slot() -> &'static RwLock<Logger> {
    static DEFAULT: OnceLock<RwLock<Logger>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(Logger::new()))
}

fn shared_registry() -> &'static SinkRegistry {
    static REGISTRY: OnceLock<SinkRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| SinkRegistry::new(SharedSink::stdout(), "", Stamp::Standard))
}

/// Returns a handle to the process-wide default logger.
pub fn standard() -> Logger {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide default logger, returning the previous one.
pub fn set_standard(logger: Logger) -> Logger {
    let mut slot = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, logger)
}

/// Sets the default logger's display threshold.
pub fn set_threshold(threshold: Severity) {
    standard().set_threshold(threshold);
}

/// Resolves `target` and makes it the default logger's journal.
pub fn set_journal<T: Into<SinkTarget>>(target: T) -> SinkResult<()> {
    standard().set_journal(target)
}

/// Records a debug message on the default logger.
pub fn debug(entry: impl Into<Entry>) {
    standard().debug(entry);
}

/// Records a user message on the default logger.
pub fn info(entry: impl Into<Entry>) {
    standard().info(entry);
}

/// Records a warning on the default logger.
pub fn warn(entry: impl Into<Entry>) {
    standard().warn(entry);
}

/// Records a failure on the default logger and exits with status 1.
pub fn fail(entry: impl Into<Entry>) -> ! {
    standard().fail(entry)
}

/// Records `entry` on the default logger through the entry point for `level`.
pub fn log_at(level: Severity, entry: impl Into<Entry>) {
    standard().log_at(level, entry);
}

/// Starts a task on the default logger.
pub fn start_task(entry: impl Into<Entry>) {
    standard().start_task(entry);
}

/// Completes the default logger's current task.
pub fn complete_task(entry: Option<Entry>) {
    standard().complete_task(entry);
}

/// Returns a debug-level adapter bound to the default logger.
pub fn writer() -> LogWriter {
    standard().writer()
}

/// Returns the default logger's `>` adapter.
pub fn out() -> LogWriter {
    standard().out()
}

/// Returns the default logger's `!` adapter.
pub fn err() -> LogWriter {
    standard().err()
}

/// Points every facility at `sink`.
///
/// Under the registry lock this replaces the default logger's display and
/// journal (dropping its alternate display), retargets the alert and audit
/// channels, and updates every writer issued by [`new_registered_writer`].
/// Once it returns, no registered writer still targets the previous sink.
pub fn set_shared_sink(sink: SharedSink) {
    shared_registry().redirect_with(sink, |sink| {
        standard().redirect_all(sink.clone());
        audit::set_output(sink.clone());
        alert::set_output(sink.clone());
    });
}

/// Returns the sink most recently installed by [`set_shared_sink`].
pub fn shared_sink() -> SharedSink {
    shared_registry().current()
}

/// Issues a writer on the shared sink that follows later redirections.
pub fn new_registered_writer(label: impl Into<String>) -> RegisteredWriter {
    shared_registry().register(label)
}

//! crates/logging/src/logger/mod.rs
//! The leveled dual-sink logger.

mod builder;
mod state;

use std::process;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use logging_sink::{SharedSink, SinkResult, SinkTarget};

use crate::entry::Entry;
use crate::indicator::TaskIndicator;
use crate::levels::Severity;
use crate::writer::LogWriter;

pub use builder::LoggerBuilder;
use state::LoggerState;

/// Separator placed between a task's name and its completion text.
pub const TASK_SUFFIX: &str = " ... ";

/// Exit status used when a failure is recorded.
pub const FAILURE_EXIT_CODE: i32 = 1;

pub(crate) struct LoggerShared {
    state: Mutex<LoggerState>,
}

/// Leveled logger writing to a filtered display sink and an unfiltered journal.
///
/// Every recording call appends `"<LEVEL>: <message>"` to the journal. When
/// the entry's severity is at or above the threshold, a line is also written
/// to the display sink: debug and user messages go to the primary display,
/// warnings and failures go to the alternate display when one is configured.
///
/// A `Logger` is a cheap handle; clones refer to the same state. All state
/// lives behind a single mutex, so sink and threshold changes are observed
/// atomically by concurrent recording calls and output order matches call
/// order.
///
/// # Examples
///
/// ```
/// use logging::{Logger, Severity};
/// use logging_sink::SharedSink;
/// use test_support::{CaptureBuffer, strip_stamp};
///
/// let display = CaptureBuffer::new();
/// let journal = CaptureBuffer::new();
/// let logger = Logger::builder()
///     .threshold(Severity::Warning)
///     .display(SharedSink::new(display.clone()))
///     .journal(SharedSink::new(journal.clone()))
///     .build();
///
/// logger.debug("cache miss");
/// logger.warn("disk full");
///
/// assert_eq!(display.contents(), "WARN: disk full\n");
/// let journal = journal.lines();
/// assert_eq!(strip_stamp(&journal[0]), "DEBUG: cache miss");
/// assert_eq!(strip_stamp(&journal[1]), "WARN: disk full");
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    /// Creates a logger for interactive use: user messages on stdout,
    /// warnings and failures on stderr, journal discarded, spinner enabled.
    pub fn new() -> Self {
        Self::builder()
            .display(SharedSink::stdout())
            .alternate_display(SharedSink::stderr())
            .build()
    }

    /// Starts building a logger.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub(crate) fn from_state(state: LoggerState) -> Self {
        Self {
            shared: Arc::new(LoggerShared {
                state: Mutex::new(state),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<LoggerShared>) -> Self {
        Self { shared }
    }

    pub(crate) fn downgrade(&self) -> Weak<LoggerShared> {
        Arc::downgrade(&self.shared)
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Reports whether both handles refer to the same logger.
    pub fn same_logger(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Journals `entry` and displays it when `level` passes the threshold.
    ///
    /// Warnings and failures first stop the task indicator and forget the
    /// current task. A [`Severity::Failure`] record flushes every sink and
    /// terminates the process with [`FAILURE_EXIT_CODE`]. A
    /// [`Severity::Silent`] record is journaled but never displayed.
    pub fn record_and_maybe_display(&self, level: Severity, entry: impl Into<Entry>) {
        self.record_locked(level, &entry.into());
        if level == Severity::Failure {
            process::exit(FAILURE_EXIT_CODE);
        }
    }

    fn record_locked(&self, level: Severity, entry: &Entry) {
        let mut state = self.lock();
        if matches!(level, Severity::Warning | Severity::Failure) {
            state.interrupt_task();
        }
        state.record(level, entry);
        state.display(level);
        if level == Severity::Failure {
            state.flush();
        }
    }

    /// Records `entry` through the entry point matching `level`.
    ///
    /// [`Severity::Silent`] entries are dropped and [`Severity::Failure`]
    /// terminates the process, exactly as [`fail`](Self::fail) does.
    pub fn log_at(&self, level: Severity, entry: impl Into<Entry>) {
        if level != Severity::Silent {
            self.record_and_maybe_display(level, entry);
        }
    }

    /// Records a debug message, displayed as `DEBUG: <message>`.
    pub fn debug(&self, entry: impl Into<Entry>) {
        self.record_and_maybe_display(Severity::Debug, entry);
    }

    /// Records a user-facing message, displayed as-is.
    pub fn info(&self, entry: impl Into<Entry>) {
        self.record_and_maybe_display(Severity::Informational, entry);
    }

    /// Records a warning, displayed as `WARN: <message>`.
    ///
    /// Any running task indicator is stopped and the current task is
    /// forgotten before the warning is written.
    pub fn warn(&self, entry: impl Into<Entry>) {
        self.record_and_maybe_display(Severity::Warning, entry);
    }

    /// Records a failure and terminates the process with status 1.
    ///
    /// Both the journal and the display sinks are flushed before exiting.
    pub fn fail(&self, entry: impl Into<Entry>) -> ! {
        self.record_locked(Severity::Failure, &entry.into());
        process::exit(FAILURE_EXIT_CODE)
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Starts a task, completing the previous one first if needed.
    ///
    /// The entry is journaled at user level. The task indicator only starts
    /// when the threshold is exactly [`Severity::Informational`]: with debug
    /// tracing the spinner would fight with debug lines, and a quieter
    /// threshold hides it anyway.
    pub fn start_task(&self, entry: impl Into<Entry>) {
        self.lock().start_task(entry.into());
    }

    /// Completes the current task.
    ///
    /// Without an entry the completion reads `"<task> ... Done."`; with one,
    /// its text is prefixed by `"<task> ... "`. The completion is always
    /// journaled, but only displayed when a task was actually running.
    pub fn complete_task(&self, entry: Option<Entry>) {
        self.lock().complete_task(entry);
    }

    /// Returns the running task's name, or an empty string.
    pub fn current_task(&self) -> String {
        self.lock().current_task.clone()
    }

    /// Returns the most recently recorded message.
    pub fn last_entry(&self) -> String {
        self.lock().last_entry.clone()
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Returns the display threshold.
    pub fn threshold(&self) -> Severity {
        self.lock().threshold
    }

    /// Sets the display threshold.
    pub fn set_threshold(&self, threshold: Severity) {
        self.lock().threshold = threshold;
    }

    /// Returns the primary display sink.
    pub fn display_sink(&self) -> SharedSink {
        self.lock().display.clone()
    }

    /// Replaces the primary display sink.
    ///
    /// The task indicator is moved to the new sink as well.
    pub fn set_display_sink(&self, sink: SharedSink) {
        let mut state = self.lock();
        state.indicator.retarget(&sink);
        state.display = sink;
    }

    /// Returns the alternate display sink used for warnings and failures.
    pub fn alternate_display_sink(&self) -> Option<SharedSink> {
        self.lock().alternate.clone()
    }

    /// Replaces (or removes) the alternate display sink.
    pub fn set_alternate_display_sink(&self, sink: Option<SharedSink>) {
        self.lock().alternate = sink;
    }

    /// Returns the journal sink.
    pub fn journal_sink(&self) -> SharedSink {
        self.lock().journal.sink().clone()
    }

    /// Replaces the journal sink.
    pub fn set_journal_sink(&self, sink: SharedSink) {
        self.lock().journal.set_sink(sink);
    }

    /// Sends the display, the journal and the task indicator to `sink` and
    /// drops the alternate display, all under one lock.
    ///
    /// A concurrent record lands entirely on the previous sinks or entirely
    /// on `sink`.
    pub fn redirect_all(&self, sink: SharedSink) {
        let mut state = self.lock();
        state.indicator.retarget(&sink);
        state.journal.set_sink(sink.clone());
        state.alternate = None;
        state.display = sink;
    }

    /// Resolves `target` and installs it as the journal.
    ///
    /// Resolution happens before the logger's lock is taken; on failure the
    /// current journal stays in place.
    pub fn set_journal<T>(&self, target: T) -> SinkResult<()>
    where
        T: Into<SinkTarget>,
    {
        let sink = target.into().resolve()?;
        self.set_journal_sink(sink);
        Ok(())
    }

    /// Replaces the task indicator, stopping the previous one.
    pub fn set_indicator(&self, indicator: Box<dyn TaskIndicator>) {
        let mut state = self.lock();
        state.indicator.stop();
        state.indicator = indicator;
    }

    /// Flushes the journal and display sinks.
    pub fn flush(&self) {
        self.lock().flush();
    }

    // ------------------------------------------------------------------
    // Writer adapters
    // ------------------------------------------------------------------

    /// Returns a debug-level writer adapter without a label.
    pub fn writer(&self) -> LogWriter {
        LogWriter::new(self)
    }

    /// Returns a debug-level adapter labelled `>`, for a child's stdout.
    pub fn out(&self) -> LogWriter {
        self.writer().with_level(Severity::Debug).with_label(">")
    }

    /// Returns a debug-level adapter labelled `!`, for a child's stderr.
    pub fn err(&self) -> LogWriter {
        self.writer().with_level(Severity::Debug).with_label("!")
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field("threshold", &state.threshold)
            .field("current_task", &state.current_task)
            .finish_non_exhaustive()
    }
}

//! crates/logging/src/logger/builder.rs
//! Option-setter style construction of [`Logger`] values.

use logging_sink::{LineWriter, SharedSink, Stamp};

use super::Logger;
use super::state::LoggerState;
use crate::indicator::{Spinner, TaskIndicator};
use crate::levels::Severity;

/// Builder for [`Logger`].
///
/// Defaults: threshold [`Severity::Informational`], display on stdout, no
/// alternate display (warnings share the primary display), journal discarded
/// with standard timestamps, and a [`Spinner`] drawing on the display sink.
#[must_use]
pub struct LoggerBuilder {
    threshold: Severity,
    display: Option<SharedSink>,
    alternate: Option<SharedSink>,
    journal: SharedSink,
    journal_stamp: Stamp,
    indicator: Option<Box<dyn TaskIndicator>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            threshold: Severity::Informational,
            display: None,
            alternate: None,
            journal: SharedSink::discard(),
            journal_stamp: Stamp::Standard,
            indicator: None,
        }
    }
}

impl LoggerBuilder {
    /// Sets the display threshold.
    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the primary display sink.
    pub fn display(mut self, sink: SharedSink) -> Self {
        self.display = Some(sink);
        self
    }

    /// Routes warnings and failures to a separate display sink.
    pub fn alternate_display(mut self, sink: SharedSink) -> Self {
        self.alternate = Some(sink);
        self
    }

    /// Sets the journal sink.
    pub fn journal(mut self, sink: SharedSink) -> Self {
        self.journal = sink;
        self
    }

    /// Sets the timestamp style of journal lines.
    pub fn journal_stamp(mut self, stamp: Stamp) -> Self {
        self.journal_stamp = stamp;
        self
    }

    /// Sets the task indicator.
    pub fn indicator<I>(mut self, indicator: I) -> Self
    where
        I: TaskIndicator + 'static,
    {
        self.indicator = Some(Box::new(indicator));
        self
    }

    /// Builds the logger.
    pub fn build(self) -> Logger {
        let display = self.display.unwrap_or_else(SharedSink::stdout);
        let indicator = self
            .indicator
            .unwrap_or_else(|| Box::new(Spinner::new(display.clone())));

        Logger::from_state(LoggerState {
            threshold: self.threshold,
            display,
            alternate: self.alternate,
            journal: LineWriter::new(self.journal, "", self.journal_stamp),
            last_entry: String::new(),
            current_task: String::new(),
            indicator,
        })
    }
}

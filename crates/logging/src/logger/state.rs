//! crates/logging/src/logger/state.rs
//! Mutable logger state. Every method here runs with the logger's lock held.

use logging_sink::{LineMode, LineWriter, SharedSink};

use super::TASK_SUFFIX;
use crate::entry::Entry;
use crate::indicator::TaskIndicator;
use crate::levels::Severity;

pub(crate) struct LoggerState {
    pub(crate) threshold: Severity,
    pub(crate) display: SharedSink,
    pub(crate) alternate: Option<SharedSink>,
    pub(crate) journal: LineWriter,
    pub(crate) last_entry: String,
    pub(crate) current_task: String,
    pub(crate) indicator: Box<dyn TaskIndicator>,
}

impl LoggerState {
    /// Renders `entry`, remembers it and appends it to the journal.
    pub(crate) fn record(&mut self, level: Severity, entry: &Entry) {
        self.last_entry = entry.render();
        let _ = self
            .journal
            .output(&format!("{level}: {}", self.last_entry));
    }

    /// Shows the last recorded entry if `level` passes the threshold.
    pub(crate) fn display(&self, level: Severity) {
        if !level.passes(self.threshold) {
            return;
        }
        let mut line = format!("{}{}", level.display_prefix(), self.last_entry);
        LineMode::WithNewline.terminate(&mut line);
        let _ = self.display_for(level).write_record(line.as_bytes());
    }

    fn display_for(&self, level: Severity) -> &SharedSink {
        match (level, &self.alternate) {
            (Severity::Warning | Severity::Failure, Some(alternate)) => alternate,
            _ => &self.display,
        }
    }

    /// Stops the indicator and forgets the current task.
    pub(crate) fn interrupt_task(&mut self) {
        self.indicator.stop();
        self.current_task.clear();
    }

    pub(crate) fn start_task(&mut self, entry: Entry) {
        if !self.current_task.is_empty() {
            self.complete_task(None);
        }

        self.record(Severity::Informational, &entry);
        self.current_task = self.last_entry.clone();

        if self.threshold == Severity::Informational {
            let prefix = format!("{}{TASK_SUFFIX}", self.current_task);
            self.indicator.restart(&prefix);
        }
    }

    pub(crate) fn complete_task(&mut self, entry: Option<Entry>) {
        self.indicator.stop();

        let prefix = format!("{}{TASK_SUFFIX}", self.current_task);
        let entry = match entry {
            None => Entry::plain(format!("{prefix}Done.")),
            Some(entry) => entry.prefixed(&prefix),
        };
        self.record(Severity::Informational, &entry);

        if !self.current_task.is_empty() {
            self.display(Severity::Informational);
            self.current_task.clear();
        }
    }

    pub(crate) fn flush(&self) {
        let _ = self.journal.sink().flush();
        let _ = self.display.flush();
        if let Some(alternate) = &self.alternate {
            let _ = alternate.flush();
        }
    }
}

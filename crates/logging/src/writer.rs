//! crates/logging/src/writer.rs
//! [`io::Write`] adapter feeding third-party output into a [`Logger`].

use std::io::{self, Write};
use std::sync::Weak;

use crate::entry::Entry;
use crate::levels::Severity;
use crate::logger::{Logger, LoggerShared};

/// Joins a label and a payload the way every adapter in the crate does.
pub(crate) fn labelled(label: &str, payload: &[u8]) -> String {
    let payload = String::from_utf8_lossy(payload);
    if label.is_empty() {
        payload.into_owned()
    } else {
        format!("{label} {payload}")
    }
}

/// Writer that turns each `write` call into one log entry.
///
/// The adapter holds a weak reference to its logger; once every [`Logger`]
/// handle is gone, writes are accepted and dropped. Each `write` call records
/// the whole buffer as one message at the adapter's severity (debug by
/// default), prefixed by the label and a space when a label is set, and
/// always reports the full length as written.
///
/// Configure the adapter with [`with_label`](Self::with_label) and
/// [`with_level`](Self::with_level) before handing it to other threads.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use logging::{Logger, Severity};
/// use logging_sink::SharedSink;
/// use test_support::{CaptureBuffer, strip_stamp};
///
/// let journal = CaptureBuffer::new();
/// let logger = Logger::builder()
///     .threshold(Severity::Warning)
///     .display(SharedSink::discard())
///     .journal(SharedSink::new(journal.clone()))
///     .build();
///
/// let mut writer = logger.writer().with_label("svc:");
/// assert_eq!(writer.write(b"disk full\n").unwrap(), 10);
/// assert_eq!(strip_stamp(&journal.contents()), "DEBUG: svc: disk full\n");
/// ```
#[derive(Clone, Debug)]
pub struct LogWriter {
    level: Severity,
    label: String,
    logger: Weak<LoggerShared>,
}

impl LogWriter {
    pub(crate) fn new(logger: &Logger) -> Self {
        Self {
            level: Severity::Debug,
            label: String::new(),
            logger: logger.downgrade(),
        }
    }

    /// Sets the label prepended to every write.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the severity writes are recorded at.
    #[must_use]
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the severity writes are recorded at.
    pub const fn level(&self) -> Severity {
        self.level
    }

    /// Returns the owning logger if it is still alive.
    pub fn logger(&self) -> Option<Logger> {
        self.logger.upgrade().map(Logger::from_shared)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(logger) = self.logger() {
            logger.log_at(self.level, Entry::Plain(labelled(&self.label, buf)));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

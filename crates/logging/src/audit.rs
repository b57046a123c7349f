//! crates/logging/src/audit.rs
//! Audit trail: timestamped UTC lines on stdout by default.

use std::io;
use std::sync::OnceLock;

use logging_sink::{SharedSink, Stamp};

use crate::entry::Entry;
use crate::registry::{RegisteredWriter, SinkRegistry};

/// Line-per-event audit log.
///
/// The log's own output and every writer handed out by [`writer`](Self::writer)
/// are registered with the same [`SinkRegistry`], so [`set_output`](Self::set_output)
/// moves all of them at once.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use logging::audit::AuditLog;
/// use logging_sink::SharedSink;
/// use test_support::CaptureBuffer;
///
/// let first = CaptureBuffer::new();
/// let second = CaptureBuffer::new();
/// let audit = AuditLog::new(SharedSink::new(first.clone()));
///
/// audit.log("line1");
/// let mut writer = audit.writer("writer:");
/// audit.set_output(SharedSink::new(second.clone()));
/// writer.write_all(b"line2").unwrap();
///
/// assert!(first.contents().ends_with("line1\n"));
/// assert!(second.contents().ends_with("writer: line2\n"));
/// ```
#[derive(Debug)]
pub struct AuditLog {
    registry: SinkRegistry,
    main: RegisteredWriter,
}

impl AuditLog {
    /// Creates an audit log writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self::with_stamp(sink, Stamp::Utc)
    }

    /// Creates an audit log with a custom timestamp style.
    pub fn with_stamp(sink: SharedSink, stamp: Stamp) -> Self {
        let registry = SinkRegistry::new(sink, "", stamp);
        let main = registry.register("");
        Self { registry, main }
    }

    /// Appends one audit line.
    pub fn log(&self, entry: impl Into<Entry>) {
        let _ = self.main.output(&entry.into().render());
    }

    /// Redirects the log and every writer it issued.
    pub fn set_output(&self, sink: SharedSink) {
        self.registry.redirect(sink);
    }

    /// Returns the current output sink.
    pub fn output(&self) -> SharedSink {
        self.registry.current()
    }

    /// Returns a writer for third-party libraries; it follows `set_output`.
    pub fn writer(&self, label: impl Into<String>) -> RegisteredWriter {
        self.registry.register(label)
    }

    /// Flushes the current sink.
    pub fn flush(&self) -> io::Result<()> {
        self.registry.current().flush()
    }
}

/// Returns the process-wide audit log (stdout until redirected).
pub fn standard() -> &'static AuditLog {
    static STANDARD: OnceLock<AuditLog> = OnceLock::new();
    STANDARD.get_or_init(|| AuditLog::new(SharedSink::stdout()))
}

/// Appends one line to the process-wide audit log.
pub fn log(entry: impl Into<Entry>) {
    standard().log(entry);
}

/// Redirects the process-wide audit log and its writers.
pub fn set_output(sink: SharedSink) {
    standard().set_output(sink);
}

/// Returns a writer on the process-wide audit log.
pub fn writer(label: impl Into<String>) -> RegisteredWriter {
    standard().writer(label)
}

//! crates/logging-sink/src/sink.rs
//!
//! Cloneable, lock-protected byte sink.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use is_terminal::IsTerminal;

type BoxedWriter = Box<dyn Write + Send>;

/// Cloneable handle to a shared byte sink.
///
/// Every clone refers to the same underlying writer. Writes performed through
/// [`write_record`](Self::write_record) or the [`Write`] implementation emit the
/// whole buffer while holding the sink's lock, so records issued from
/// different threads never interleave inside a single line.
///
/// # Examples
///
/// ```
/// use logging_sink::SharedSink;
///
/// let buffer = test_support::CaptureBuffer::new();
/// let sink = SharedSink::new(buffer.clone());
/// let alias = sink.clone();
///
/// sink.write_record(b"first\n").unwrap();
/// alias.write_record(b"second\n").unwrap();
///
/// assert!(sink.same_sink(&alias));
/// assert_eq!(buffer.contents(), "first\nsecond\n");
/// ```
#[derive(Clone)]
pub struct SharedSink {
    writer: Arc<Mutex<BoxedWriter>>,
    terminal: bool,
    label: &'static str,
}

impl SharedSink {
    /// Wraps an arbitrary writer.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_parts(Box::new(writer), false, "writer")
    }

    /// Returns a sink that drops everything written to it.
    pub fn discard() -> Self {
        Self::from_parts(Box::new(io::sink()), false, "discard")
    }

    /// Returns a sink writing to the process's standard output.
    pub fn stdout() -> Self {
        let terminal = io::stdout().is_terminal();
        Self::from_parts(Box::new(io::stdout()), terminal, "stdout")
    }

    /// Returns a sink writing to the process's standard error.
    pub fn stderr() -> Self {
        let terminal = io::stderr().is_terminal();
        Self::from_parts(Box::new(io::stderr()), terminal, "stderr")
    }

    fn from_parts(writer: BoxedWriter, terminal: bool, label: &'static str) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            terminal,
            label,
        }
    }

    /// Reports whether the sink was a terminal when it was created.
    ///
    /// Only the standard-stream constructors can report `true`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Reports whether both handles refer to the same underlying writer.
    #[must_use]
    pub fn same_sink(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    /// Writes `record` in full while holding the sink's lock.
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.lock().write_all(record)
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }

    fn lock(&self) -> MutexGuard<'_, BoxedWriter> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedSink {
    fn default() -> Self {
        Self::discard()
    }
}

impl fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSink")
            .field("label", &self.label)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        SharedSink::flush(self)
    }
}

impl Write for &SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        SharedSink::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use test_support::CaptureBuffer;

    #[test]
    fn clones_share_the_same_writer() {
        let buffer = CaptureBuffer::new();
        let sink = SharedSink::new(buffer.clone());
        let mut alias = sink.clone();

        sink.write_record(b"one\n").unwrap();
        alias.write_all(b"two\n").unwrap();

        assert!(sink.same_sink(&alias));
        assert_eq!(buffer.contents(), "one\ntwo\n");
    }

    #[test]
    fn distinct_sinks_are_not_the_same() {
        let first = SharedSink::new(CaptureBuffer::new());
        let second = SharedSink::new(CaptureBuffer::new());
        assert!(!first.same_sink(&second));
    }

    #[test]
    fn discard_accepts_writes() {
        let sink = SharedSink::discard();
        sink.write_record(b"ignored").unwrap();
        sink.flush().unwrap();
        assert!(!sink.is_terminal());
    }

    #[test]
    fn write_reports_full_length() {
        let mut sink = SharedSink::new(CaptureBuffer::new());
        assert_eq!(sink.write(b"12345").unwrap(), 5);
    }

    #[test]
    fn debug_names_the_sink_kind() {
        let rendered = format!("{:?}", SharedSink::discard());
        assert!(rendered.contains("discard"));
    }

    #[test]
    fn concurrent_records_never_interleave() {
        let buffer = CaptureBuffer::new();
        let sink = SharedSink::new(buffer.clone());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let line = format!("worker-{worker}-{}\n", "x".repeat(64));
                        sink.write_record(line.as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = buffer.contents();
        assert_eq!(contents.lines().count(), 400);
        for line in contents.lines() {
            assert!(line.starts_with("worker-"));
            assert!(line.ends_with(&"x".repeat(64)));
        }
    }
}

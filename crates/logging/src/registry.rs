//! crates/logging/src/registry.rs
//! Writers that follow a shared sink across redirections.
//!
//! A [`SinkRegistry`] owns the "current" sink of a facility together with an
//! append-only list of every [`RegisteredWriter`] it has handed out.
//! [`SinkRegistry::redirect`] swaps the current sink and retargets each issued
//! writer while holding the registry lock, so once it returns no writer can
//! still be writing to the old destination.
//!
//! Lock order is always registry first, then an individual writer. Writers
//! only ever take their own lock, which makes a single write land entirely on
//! either the old or the new sink.

use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging_sink::{CallerStyle, LineWriter, SharedSink, Stamp};

use crate::writer::labelled;

struct RegistryState {
    current: SharedSink,
    writers: Vec<Arc<Mutex<LineWriter>>>,
}

/// Shared sink plus every writer that must follow it.
pub struct SinkRegistry {
    prefix: String,
    stamp: Stamp,
    caller: CallerStyle,
    state: Mutex<RegistryState>,
}

impl SinkRegistry {
    /// Creates a registry whose writers emit `prefix + timestamp + message`.
    pub fn new(sink: SharedSink, prefix: impl Into<String>, stamp: Stamp) -> Self {
        Self {
            prefix: prefix.into(),
            stamp,
            caller: CallerStyle::None,
            state: Mutex::new(RegistryState {
                current: sink,
                writers: Vec::new(),
            }),
        }
    }

    /// Renders the caller location in lines written via [`RegisteredWriter::output_at`].
    #[must_use]
    pub fn with_caller(mut self, caller: CallerStyle) -> Self {
        self.caller = caller;
        self
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current shared sink.
    pub fn current(&self) -> SharedSink {
        self.lock().current.clone()
    }

    /// Returns how many writers have been issued.
    pub fn len(&self) -> usize {
        self.lock().writers.len()
    }

    /// Reports whether no writer has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.lock().writers.is_empty()
    }

    /// Issues a writer bound to the current sink and records it.
    pub fn register(&self, label: impl Into<String>) -> RegisteredWriter {
        let mut state = self.lock();
        let line = LineWriter::new(state.current.clone(), self.prefix.clone(), self.stamp)
            .with_caller(self.caller);
        let target = Arc::new(Mutex::new(line));
        state.writers.push(Arc::clone(&target));
        RegisteredWriter {
            label: label.into(),
            target,
        }
    }

    /// Makes `sink` current and retargets every issued writer.
    pub fn redirect(&self, sink: SharedSink) {
        self.redirect_with(sink, |_| {});
    }

    /// Like [`redirect`](Self::redirect), running `also` inside the same
    /// critical section so other facilities switch at the same moment.
    pub fn redirect_with<F>(&self, sink: SharedSink, also: F)
    where
        F: FnOnce(&SharedSink),
    {
        let mut state = self.lock();
        for writer in &state.writers {
            writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set_sink(sink.clone());
        }
        also(&sink);
        state.current = sink;
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("prefix", &self.prefix)
            .field("writers", &self.len())
            .finish_non_exhaustive()
    }
}

/// Line writer issued by a [`SinkRegistry`].
///
/// Each `write` call becomes one line `prefix + timestamp + label + " " +
/// payload` on whatever sink the registry currently designates. Clones share
/// the same registration.
#[derive(Clone)]
pub struct RegisteredWriter {
    label: String,
    target: Arc<Mutex<LineWriter>>,
}

impl RegisteredWriter {
    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the sink this writer currently targets.
    pub fn sink(&self) -> SharedSink {
        self.lock().sink().clone()
    }

    fn lock(&self) -> MutexGuard<'_, LineWriter> {
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `message` as one line.
    pub fn output(&self, message: &str) -> io::Result<()> {
        self.output_at(None, message)
    }

    /// Writes `message` as one line attributed to `location`.
    pub fn output_at(&self, location: Option<&Location<'_>>, message: &str) -> io::Result<()> {
        let message = labelled(&self.label, message.as_bytes());
        self.lock().output_at(location, &message)
    }
}

impl Write for RegisteredWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let message = labelled(&self.label, buf);
        // Third-party output is never allowed to fail the caller.
        let _ = self.lock().output(&message);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let sink = self.sink();
        sink.flush()
    }
}

impl std::fmt::Debug for RegisteredWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredWriter")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

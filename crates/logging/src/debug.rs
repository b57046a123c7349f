//! crates/logging/src/debug.rs
//! Developer debug channel, disabled until explicitly enabled.

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use logging_sink::{CallerStyle, LineWriter, SharedSink, Stamp};

use crate::entry::Entry;

/// Line prefix for debug output.
pub const DEBUG_PREFIX: &str = "DEBUG ";

/// Text placed before the message of a failed assertion.
pub const ASSERTION_PREFIX: &str = "ASSERTION FAILED: ";

/// Switchable debug printer.
///
/// Lines look like `DEBUG 2024/05/01 12:00:00.123456 main.rs:42: message`.
/// While disabled every call is a cheap atomic load.
#[derive(Debug)]
pub struct Debugger {
    enabled: AtomicBool,
    out: Mutex<LineWriter>,
}

impl Debugger {
    /// Creates a disabled debugger writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        let out =
            LineWriter::new(sink, DEBUG_PREFIX, Stamp::Micros).with_caller(CallerStyle::Short);
        Self {
            enabled: AtomicBool::new(false),
            out: Mutex::new(out),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LineWriter> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Turns output on.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Turns output off.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Reports whether output is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Replaces the output sink.
    pub fn set_output(&self, sink: SharedSink) {
        self.lock().set_sink(sink);
    }

    /// Prints `entry` when enabled.
    #[track_caller]
    pub fn print(&self, entry: impl Into<Entry>) {
        if self.is_enabled() {
            self.emit(Location::caller(), &entry.into().render());
        }
    }

    /// When enabled and `condition` is false, prints the failure and panics.
    ///
    /// Disabled debuggers never evaluate anything beyond the flag.
    ///
    /// # Panics
    ///
    /// Panics with the rendered message when the assertion fails.
    #[track_caller]
    pub fn assert(&self, condition: bool, entry: impl Into<Entry>) {
        if !self.is_enabled() || condition {
            return;
        }
        let message = format!("{ASSERTION_PREFIX}{}", entry.into().render());
        self.emit(Location::caller(), &message);
        let _ = self.lock().sink().flush();
        panic!("{message}");
    }

    fn emit(&self, location: &Location<'_>, message: &str) {
        let _ = self.lock().output_at(Some(location), message);
    }
}

/// Returns the process-wide debugger (stderr, disabled).
pub fn standard() -> &'static Debugger {
    static STANDARD: OnceLock<Debugger> = OnceLock::new();
    STANDARD.get_or_init(|| Debugger::new(SharedSink::stderr()))
}

/// Enables the process-wide debugger.
pub fn enable() {
    standard().enable();
}

/// Disables the process-wide debugger.
pub fn disable() {
    standard().disable();
}

/// Reports whether the process-wide debugger is enabled.
pub fn is_enabled() -> bool {
    standard().is_enabled()
}

/// Redirects the process-wide debugger.
pub fn set_output(sink: SharedSink) {
    standard().set_output(sink);
}

/// Prints on the process-wide debugger.
#[track_caller]
pub fn print(entry: impl Into<Entry>) {
    standard().print(entry);
}

/// Asserts on the process-wide debugger.
#[track_caller]
pub fn assert(condition: bool, entry: impl Into<Entry>) {
    standard().assert(condition, entry);
}

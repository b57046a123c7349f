#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a leveled application logger with two destinations. Every
//! record is appended, timestamped, to an unfiltered *journal*; records whose
//! [`Severity`] passes the configured threshold are also written to a
//! human-facing *display*. On top of that sit task tracking with a progress
//! indicator, [`LogWriter`] adapters that turn third-party byte output into
//! log records, and a process-wide default logger with forwarding functions.
//!
//! # Design
//!
//! - [`Logger`] is a cheap, cloneable handle around one mutex. Recording,
//!   sink swaps and threshold changes all take that lock, so output order is
//!   call order and a redirection never tears a line across two sinks.
//! - [`Entry`] is the closed set of things that can be logged: an error, a
//!   pre-formatted message, or plain text that is never reinterpreted as a
//!   format string. The [`user_log!`] family of macros builds entries at the
//!   call site.
//! - [`TaskIndicator`] decouples task tracking from the terminal; [`Spinner`]
//!   is the interactive implementation.
//! - [`SinkRegistry`] keeps every writer handed out for a shared sink so a
//!   redirection reaches writers that were captured earlier.
//! - The [`alert`], [`audit`] and [`debug`] channels are line loggers for
//!   operator alerts, audit trails and developer tracing.
//!
//! # Invariants
//!
//! - The journal receives exactly one line per recording call, whatever the
//!   threshold.
//! - [`Severity::Silent`] is only a threshold; it is never emitted.
//! - Warnings and failures stop the task indicator and clear the current
//!   task before they are written.
//! - [`Logger::fail`] flushes both sinks, then exits with status
//!   [`FAILURE_EXIT_CODE`].
//!
//! # Examples
//!
//! ```
//! use std::io::Write;
//! use logging::{Logger, Severity};
//! use logging_sink::SharedSink;
//! use test_support::{CaptureBuffer, strip_stamp};
//!
//! let display = CaptureBuffer::new();
//! let journal = CaptureBuffer::new();
//! let logger = Logger::builder()
//!     .threshold(Severity::Warning)
//!     .display(SharedSink::new(display.clone()))
//!     .journal(SharedSink::new(journal.clone()))
//!     .build();
//!
//! let mut writer = logger.writer().with_label("svc:");
//! writer.write_all(b"disk full\n").unwrap();
//! logger.warn("disk full");
//!
//! assert_eq!(display.contents(), "WARN: disk full\n");
//! let journal = journal.lines();
//! assert_eq!(strip_stamp(&journal[0]), "DEBUG: svc: disk full");
//! assert_eq!(strip_stamp(&journal[1]), "WARN: disk full");
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for sink resolution and the timestamped line writer.

#[macro_use]
mod macros;

pub mod alert;
pub mod audit;
mod config;
pub mod debug;
mod entry;
mod global;
mod indicator;
mod levels;
mod logger;
mod registry;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod writer;

pub use config::{ConfigError, LoggerConfig};
pub use entry::Entry;
pub use global::{
    complete_task, debug, err, fail, info, log_at, new_registered_writer, out, set_journal,
    set_shared_sink, set_standard, set_threshold, shared_sink, standard, start_task, warn, writer,
};
pub use indicator::{
    ERASE_LINE, IndicatorEvent, NoopIndicator, RecordingIndicator, SPINNER_FRAMES,
    SPINNER_INTERVAL, Spinner, TaskIndicator,
};
pub use levels::{ParseSeverityError, Severity};
pub use logger::{FAILURE_EXIT_CODE, Logger, LoggerBuilder, TASK_SUFFIX};
pub use registry::{RegisteredWriter, SinkRegistry};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing};
pub use writer::LogWriter;

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the byte-sink plumbing shared by every applog
//! facility. Loggers never hold a concrete writer; they hold a [`SharedSink`],
//! a cloneable handle around a mutex-guarded [`std::io::Write`] implementor, so
//! a sink can be swapped out while other threads are still recording.
//!
//! # Design
//!
//! - [`SharedSink`] serialises writes: each [`SharedSink::write_record`] call
//!   emits its whole buffer while holding the sink's lock, so concurrent
//!   records never interleave inside a line.
//! - [`SinkTarget`] and [`create_writer`] resolve symbolic destinations
//!   (`""`, `"stdout"`, `"stderr"`, or a file path) into a [`SharedSink`].
//!   Files are opened for appending and created with owner-only permissions.
//! - [`LineWriter`] renders prefixed, timestamped lines the way a classic
//!   line logger does, ensuring every record ends with a newline according to
//!   its [`LineMode`].
//!
//! # Errors
//!
//! Resolution surfaces [`SinkError`] when a log file cannot be opened. Writes
//! through a [`SharedSink`] return [`std::io::Error`] values originating from
//! the underlying writer; higher layers decide whether to surface or swallow
//! them.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LineWriter, SharedSink, Stamp};
//!
//! let buffer = test_support::CaptureBuffer::new();
//! let sink = SharedSink::new(buffer.clone());
//! let writer = LineWriter::new(sink, "ALERT ", Stamp::None);
//!
//! writer.output("disk almost full").unwrap();
//! assert_eq!(buffer.contents(), "ALERT disk almost full\n");
//! ```

mod error;
mod line_mode;
mod line_writer;
mod sink;
mod target;

pub use error::{SinkError, SinkResult};
pub use line_mode::LineMode;
pub use line_writer::{CallerStyle, LineWriter, Stamp};
pub use sink::SharedSink;
pub use target::{LOG_FILE_MODE, SinkTarget, create_writer, open_log_file};

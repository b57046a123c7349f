//! crates/logging-sink/src/target.rs
//!
//! Resolution of symbolic output destinations into [`SharedSink`] handles.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{SinkError, SinkResult};
use crate::sink::SharedSink;

/// Permission bits applied to newly created log files (owner read/write).
pub const LOG_FILE_MODE: u32 = 0o600;

/// Abstract output request accepted wherever a sink can be configured.
///
/// String conversions follow the usual command-line conventions: the empty
/// string discards output, `stdout`/`stderr` (any case) select the standard
/// streams, and anything else names a file that is opened for appending.
#[derive(Clone, Debug)]
pub enum SinkTarget {
    /// Drop all output.
    Discard,
    /// The process's standard output.
    Stdout,
    /// The process's standard error.
    Stderr,
    /// An append-only log file, created with [`LOG_FILE_MODE`] when missing.
    File(PathBuf),
    /// An already constructed sink.
    Sink(SharedSink),
}

impl SinkTarget {
    /// Parses a symbolic destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::SinkTarget;
    ///
    /// assert!(matches!(SinkTarget::parse(""), SinkTarget::Discard));
    /// assert!(matches!(SinkTarget::parse("STDERR"), SinkTarget::Stderr));
    /// assert!(matches!(SinkTarget::parse("/tmp/app.log"), SinkTarget::File(_)));
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            Self::Discard
        } else if value.eq_ignore_ascii_case("stdout") {
            Self::Stdout
        } else if value.eq_ignore_ascii_case("stderr") {
            Self::Stderr
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Turns the request into a concrete sink.
    pub fn resolve(self) -> SinkResult<SharedSink> {
        match self {
            Self::Discard => Ok(SharedSink::discard()),
            Self::Stdout => Ok(SharedSink::stdout()),
            Self::Stderr => Ok(SharedSink::stderr()),
            Self::File(path) => open_log_file(&path).map(SharedSink::new),
            Self::Sink(sink) => Ok(sink),
        }
    }
}

impl From<&str> for SinkTarget {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for SinkTarget {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PathBuf> for SinkTarget {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for SinkTarget {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<SharedSink> for SinkTarget {
    fn from(sink: SharedSink) -> Self {
        Self::Sink(sink)
    }
}

/// Resolves any supported destination into a [`SharedSink`].
///
/// # Examples
///
/// ```
/// use logging_sink::create_writer;
///
/// let sink = create_writer("").unwrap();
/// sink.write_record(b"goes nowhere\n").unwrap();
/// ```
pub fn create_writer<T>(target: T) -> SinkResult<SharedSink>
where
    T: Into<SinkTarget>,
{
    target.into().resolve()
}

/// Opens `path` for appending, creating it with [`LOG_FILE_MODE`] if needed.
pub fn open_log_file(path: &Path) -> SinkResult<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true).read(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }
    options.open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })
}

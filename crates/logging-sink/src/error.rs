//! crates/logging-sink/src/error.rs
//!
//! Error types for sink resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sink resolution.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors raised while turning a [`SinkTarget`](crate::SinkTarget) into a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log file could not be opened or created.
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Returns the path associated with the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } => path,
        }
    }
}

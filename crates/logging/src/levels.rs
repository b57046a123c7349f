//! crates/logging/src/levels.rs
//! Severity levels and their display names.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Ordered severity of a log entry.
///
/// The ordering drives the display filter: an entry reaches the display sink
/// when its severity is at or above the logger's threshold. [`Severity::Silent`]
/// only makes sense as a threshold; entries are never emitted at that level.
///
/// # Examples
///
/// ```
/// use logging::Severity;
///
/// assert!(Severity::Debug < Severity::Informational);
/// assert!(Severity::Failure < Severity::Silent);
/// assert_eq!(Severity::Informational.to_string(), "USER");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// Tracing output for developers.
    Debug = 0,
    /// Messages meant for the user.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "user", alias = "info"))]
    Informational = 1,
    /// Something went wrong but the program carries on.
    #[cfg_attr(feature = "serde", serde(alias = "warn"))]
    Warning = 2,
    /// Unrecoverable; recording a failure terminates the process.
    #[cfg_attr(feature = "serde", serde(alias = "fail", alias = "error"))]
    Failure = 3,
    /// Threshold that hides everything.
    Silent = 4,
}

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Informational,
        Self::Warning,
        Self::Failure,
        Self::Silent,
    ];

    /// Returns the fixed upper-case name used in journal lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Informational => "USER",
            Self::Warning => "WARN",
            Self::Failure => "FAIL",
            Self::Silent => "SILENT",
        }
    }

    /// Converts a numeric level back into a severity.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Debug),
            1 => Some(Self::Informational),
            2 => Some(Self::Warning),
            3 => Some(Self::Failure),
            4 => Some(Self::Silent),
            _ => None,
        }
    }

    /// Describes a numeric level, tolerating values outside the enum.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::describe(2), "WARN");
    /// assert_eq!(Severity::describe(9), "Unknown level: 9");
    /// ```
    #[must_use]
    pub fn describe(value: u8) -> Cow<'static, str> {
        match Self::from_u8(value) {
            Some(level) => Cow::Borrowed(level.as_str()),
            None => Cow::Owned(format!("Unknown level: {value}")),
        }
    }

    /// Reports whether entries can be recorded at this level.
    #[must_use]
    pub const fn is_emitted(self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Reports whether an entry at this level passes `threshold`.
    #[must_use]
    pub fn passes(self, threshold: Self) -> bool {
        self.is_emitted() && self >= threshold
    }

    /// Prefix placed before the message on the display sink.
    pub(crate) const fn display_prefix(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG: ",
            Self::Warning => "WARN: ",
            Self::Informational | Self::Failure | Self::Silent => "",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown severity '{0}' (expected debug, user, warn, fail or silent)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "user" | "info" | "informational" => Ok(Self::Informational),
            "warn" | "warning" => Ok(Self::Warning),
            "fail" | "failure" | "error" => Ok(Self::Failure),
            "silent" | "quiet" => Ok(Self::Silent),
            _ => Err(ParseSeverityError(s.to_owned())),
        }
    }
}

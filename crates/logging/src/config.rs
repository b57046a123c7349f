//! crates/logging/src/config.rs
//! Declarative logger configuration.

use logging_sink::{SharedSink, SinkError, SinkTarget};
use thiserror::Error;

use crate::indicator::NoopIndicator;
use crate::levels::{ParseSeverityError, Severity};
use crate::logger::Logger;

/// Errors raised while applying or building a [`LoggerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A sink could not be resolved.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// A severity name was not recognised.
    #[error(transparent)]
    Severity(#[from] ParseSeverityError),
    /// The configuration key is unknown.
    #[error("unknown logging option '{0}'")]
    UnknownKey(String),
    /// The value is not valid for the key.
    #[error("invalid value '{value}' for logging option '{key}'")]
    InvalidValue {
        /// Option being set.
        key: String,
        /// Rejected value.
        value: String,
    },
}

/// Plain-data description of a [`Logger`].
///
/// # Examples
///
/// ```
/// use logging::{LoggerConfig, Severity};
///
/// let mut config = LoggerConfig::default();
/// config.apply_directive("threshold=warn").unwrap();
/// config.apply_directive("spinner=off").unwrap();
///
/// assert_eq!(config.threshold, Severity::Warning);
/// assert!(!config.spinner);
/// assert!(config.apply_directive("colour=always").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Minimum severity shown on the display.
    pub threshold: Severity,
    /// Journal destination: `""`, `stdout`, `stderr`, or a file path.
    pub journal: String,
    /// Send warnings and failures to stderr instead of stdout.
    pub split_streams: bool,
    /// Draw a spinner while tasks run.
    pub spinner: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Informational,
            journal: String::new(),
            split_streams: true,
            spinner: true,
        }
    }
}

impl LoggerConfig {
    /// Sets a single option by name.
    ///
    /// Recognised keys: `threshold`, `journal`, `split`, `spinner`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.trim() {
            "threshold" | "level" => self.threshold = value.parse()?,
            "journal" => self.journal = value.to_owned(),
            "split" => self.split_streams = parse_switch(key, value)?,
            "spinner" => self.spinner = parse_switch(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_owned())),
        }
        Ok(())
    }

    /// Applies a `key=value` directive.
    pub fn apply_directive(&mut self, directive: &str) -> Result<(), ConfigError> {
        let (key, value) = directive
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidValue {
                key: directive.to_owned(),
                value: String::new(),
            })?;
        self.apply(key, value.trim())
    }

    /// Resolves the journal and builds a logger on stdout and stderr.
    pub fn build(&self) -> Result<Logger, ConfigError> {
        self.build_with(SharedSink::stdout(), SharedSink::stderr())
    }

    /// Builds a logger on the given display streams.
    ///
    /// `alternate` only receives warnings and failures when `split_streams`
    /// is set.
    pub fn build_with(
        &self,
        display: SharedSink,
        alternate: SharedSink,
    ) -> Result<Logger, ConfigError> {
        let journal = SinkTarget::parse(&self.journal).resolve()?;

        let mut builder = Logger::builder()
            .threshold(self.threshold)
            .display(display)
            .journal(journal);
        if self.split_streams {
            builder = builder.alternate_display(alternate);
        }
        if !self.spinner {
            builder = builder.indicator(NoopIndicator);
        }
        Ok(builder.build())
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_interactive_logger() {
        let config = LoggerConfig::default();
        assert_eq!(config.threshold, Severity::Informational);
        assert!(config.journal.is_empty());
        assert!(config.split_streams);
        assert!(config.spinner);
    }

    #[test]
    fn apply_sets_known_keys() {
        let mut config = LoggerConfig::default();
        config.apply("threshold", "debug").unwrap();
        config.apply("journal", "/var/log/app.log").unwrap();
        config.apply("split", "no").unwrap();

        assert_eq!(config.threshold, Severity::Debug);
        assert_eq!(config.journal, "/var/log/app.log");
        assert!(!config.split_streams);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut config = LoggerConfig::default();
        let error = config.apply("rotation", "daily").unwrap_err();
        assert!(matches!(error, ConfigError::UnknownKey(ref key) if key == "rotation"));
    }

    #[test]
    fn apply_rejects_bad_severity() {
        let mut config = LoggerConfig::default();
        let error = config.apply("threshold", "shouty").unwrap_err();
        assert!(matches!(error, ConfigError::Severity(_)));
        assert!(error.to_string().contains("shouty"));
    }

    #[test]
    fn apply_rejects_bad_switch() {
        let mut config = LoggerConfig::default();
        let error = config.apply("spinner", "maybe").unwrap_err();
        assert!(error.to_string().contains("maybe"));
    }

    #[test]
    fn directive_requires_equals_sign() {
        let mut config = LoggerConfig::default();
        assert!(matches!(
            config.apply_directive("threshold"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn build_reports_unopenable_journal() {
        let dir = test_support::TempLogDir::new().unwrap();
        let config = LoggerConfig {
            journal: dir
                .log_path("no-such-dir")
                .join("journal.log")
                .display()
                .to_string(),
            ..LoggerConfig::default()
        };

        assert!(matches!(config.build(), Err(ConfigError::Sink(_))));
    }

    #[test]
    fn build_applies_threshold() {
        let config = LoggerConfig {
            threshold: Severity::Warning,
            spinner: false,
            ..LoggerConfig::default()
        };
        let logger = config.build().unwrap();
        assert_eq!(logger.threshold(), Severity::Warning);
        assert!(logger.alternate_display_sink().is_some());
    }

    #[test]
    fn build_with_routes_warnings_to_alternate_when_split() {
        let display = test_support::CaptureBuffer::new();
        let alternate = test_support::CaptureBuffer::new();
        let config = LoggerConfig {
            spinner: false,
            ..LoggerConfig::default()
        };
        let logger = config
            .build_with(
                SharedSink::new(display.clone()),
                SharedSink::new(alternate.clone()),
            )
            .unwrap();

        logger.info("ok");
        logger.warn("hmm");

        assert_eq!(display.contents(), "ok\n");
        assert_eq!(alternate.contents(), "WARN: hmm\n");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let config: LoggerConfig = serde_json::from_str(r#"{"threshold":"warn"}"#).unwrap();
        assert_eq!(config.threshold, Severity::Warning);
        assert!(config.split_streams);
    }
}

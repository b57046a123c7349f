//! crates/cli/src/execution.rs
//! Drives a [`Logger`] from parsed arguments.

use std::io::{self, BufRead, Write};

use logging::{ConfigError, Entry, Logger, LoggerConfig, debug_print};
use logging_sink::SharedSink;
use thiserror::Error;

use crate::arguments::ParsedArgs;

/// Errors that stop `applog` before or while logging.
#[derive(Debug, Error)]
pub enum CliError {
    /// The logger could not be configured.
    #[error("cannot configure logger")]
    Config(#[from] ConfigError),
    /// Reading standard input failed.
    #[error("cannot read standard input")]
    Input(#[source] io::Error),
}

/// Display streams handed to [`execute`].
#[derive(Clone, Debug)]
pub struct Streams {
    /// Primary display.
    pub display: SharedSink,
    /// Receives warnings and failures with `--split`.
    pub alternate: SharedSink,
}

impl Streams {
    /// The process's stdout and stderr.
    pub fn standard() -> Self {
        Self {
            display: SharedSink::stdout(),
            alternate: SharedSink::stderr(),
        }
    }
}

/// Builds the logger described by `parsed`.
pub fn build_logger(parsed: &ParsedArgs, streams: Streams) -> Result<Logger, CliError> {
    let config = LoggerConfig {
        threshold: parsed.threshold,
        journal: parsed.journal.clone(),
        split_streams: parsed.split,
        spinner: !parsed.no_spinner,
    };
    Ok(config.build_with(streams.display, streams.alternate)?)
}

/// Logs the message, or every line of `input` when no message was given.
///
/// A `--severity fail` record terminates the process with status 1 once it
/// has been written.
pub fn execute<R>(parsed: &ParsedArgs, logger: &Logger, input: R) -> Result<(), CliError>
where
    R: BufRead,
{
    tracing::debug!(
        "logger configured: threshold {}, severity {}",
        parsed.threshold,
        parsed.severity
    );

    if let Some(task) = &parsed.task {
        logger.start_task(Entry::plain(task.as_str()));
    }

    let outcome = match parsed.message_text() {
        Some(message) => {
            logger.log_at(parsed.severity, Entry::plain(message));
            Ok(())
        }
        None => pipe_lines(parsed, logger, input),
    };

    if parsed.task.is_some() {
        logger.complete_task(None);
    }
    logger.flush();
    outcome
}

fn pipe_lines<R: BufRead>(
    parsed: &ParsedArgs,
    logger: &Logger,
    mut input: R,
) -> Result<(), CliError> {
    let mut writer = logger
        .writer()
        .with_level(parsed.severity)
        .with_label(parsed.label.as_str());
    let mut count = 0_usize;
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line).map_err(CliError::Input)? == 0 {
            break;
        }
        let _ = writer.write_all(trim_line_ending(&line));
        count += 1;
    }
    debug_print!("piped {} line(s) from stdin", count);
    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

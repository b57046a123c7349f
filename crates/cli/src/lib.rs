#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `applog` command-line front end. It records a single
//! message, or every line of standard input, through a [`logging::Logger`]
//! configured from the command line: display threshold, record severity,
//! journal destination, stdin label, an optional task wrapped around the run,
//! and whether warnings go to stderr.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error, which receive help, version and diagnostic text. The
//! records themselves go through the logger's own sinks (the process's stdout
//! and stderr), so a spinner thread never competes with a caller-held lock.
//! Parsing uses a [`clap`](https://docs.rs/clap/) builder command with the
//! built-in help and version flags disabled, so their output stays under this
//! crate's control.
//!
//! # Invariants
//!
//! - `run` never panics; argument and configuration errors surface as exit
//!   code `1` with a diagnostic on the error handle.
//! - `--severity fail` terminates the process with status 1 after the record
//!   reached both the display and the journal.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["applog", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("applog "));
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - `src/bin/applog.rs` for the binary that wires [`run`] into `main`.

mod arguments;
mod execution;

use std::ffi::OsString;
use std::io::{self, Write};

pub use arguments::{PROGRAM_NAME, ParsedArgs, parse_args};
pub use execution::{CliError, Streams, build_logger, execute};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Exit code for argument, configuration and input errors.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Deterministic help text describing the CLI surface.
const HELP_TEXT: &str = concat!(
    "Usage: applog [OPTIONS] [MESSAGE]...\n",
    "\n",
    "Records MESSAGE, or each line of standard input when no MESSAGE is\n",
    "given, on a leveled logger with a filtered display and an unfiltered\n",
    "journal. LEVEL is one of debug, user, warn, fail or silent.\n",
    "\n",
    "Options:\n",
    "  -t, --threshold LEVEL  Minimum severity shown on the display (user).\n",
    "  -s, --severity LEVEL   Severity of the message or of each line (user).\n",
    "  -j, --journal TARGET   Journal destination: stdout, stderr or a path.\n",
    "  -l, --label TEXT       Label prepended to each line read from stdin.\n",
    "      --task TEXT        Run everything inside a task named TEXT.\n",
    "      --split            Send warnings and failures to stderr.\n",
    "      --debug            Enable debug tracing of applog itself.\n",
    "      --no-spinner       Never draw the task spinner.\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
);

/// Renders the version banner.
fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code the caller should use.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let _ = write!(stderr, "{PROGRAM_NAME}: {error}");
            return USAGE_EXIT_CODE;
        }
    };

    if parsed.show_help {
        return report(stdout.write_all(HELP_TEXT.as_bytes()));
    }
    if parsed.show_version {
        return report(stdout.write_all(render_version().as_bytes()));
    }

    if parsed.debug {
        logging::debug::enable();
    }

    let outcome = build_logger(&parsed, Streams::standard()).and_then(|logger| {
        if parsed.debug {
            logging::init_tracing(logger.clone());
        }
        execute(&parsed, &logger, io::stdin().lock())
    });

    match outcome {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{}", logging::alert::abort_report(&error));
            USAGE_EXIT_CODE
        }
    }
}

fn report(result: io::Result<()>) -> i32 {
    if result.is_ok() { 0 } else { USAGE_EXIT_CODE }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_is_written_to_stdout() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let status = run(["applog", "--help"], &mut stdout, &mut stderr);

        assert_eq!(status, 0);
        assert_eq!(String::from_utf8(stdout).unwrap(), HELP_TEXT);
        assert!(stderr.is_empty());
    }

    #[test]
    fn parse_errors_go_to_stderr() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let status = run(["applog", "--severity", "loud"], &mut stdout, &mut stderr);

        assert_eq!(status, USAGE_EXIT_CODE);
        assert!(stdout.is_empty());
        let stderr = String::from_utf8(stderr).unwrap();
        assert!(stderr.starts_with("applog: "), "{stderr}");
    }

    #[test]
    fn config_errors_print_abort_report() {
        let dir = test_support::TempLogDir::new().unwrap();
        let journal = dir.log_path("missing").join("x.log");
        let journal_arg = format!("--journal={}", journal.display());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let status = run(["applog", &journal_arg, "msg"], &mut stdout, &mut stderr);

        assert_eq!(status, USAGE_EXIT_CODE);
        let stderr = String::from_utf8(stderr).unwrap();
        assert!(
            stderr.starts_with("Aborting program execution due to error(s):\ncannot configure logger"),
            "{stderr}"
        );
    }

    #[test]
    fn exit_code_is_clamped() {
        assert_eq!(exit_code_from(0), std::process::ExitCode::SUCCESS);
        assert_eq!(exit_code_from(-3), std::process::ExitCode::SUCCESS);
        assert_eq!(exit_code_from(1000), std::process::ExitCode::from(255));
    }
}

//! Integration tests for the process-terminating paths.
//!
//! Each test re-executes this test binary, filtered to a single child test,
//! with an environment variable naming a scratch directory. The child logs to
//! files in that directory and terminates; the parent checks the exit status
//! and what reached both files.

use std::env;
use std::path::Path;
use std::process::{Command, ExitStatus};

use logging::alert::AlertLog;
use logging::{FAILURE_EXIT_CODE, Logger, NoopIndicator, Severity, fail_log};
use logging_sink::SinkTarget;
use test_support::{TempLogDir, strip_stamp};

const CHILD_DIR: &str = "APPLOG_FATAL_CHILD_DIR";

fn child_dir() -> Option<std::path::PathBuf> {
    env::var_os(CHILD_DIR).map(Into::into)
}

fn run_child(test: &str, dir: &Path) -> ExitStatus {
    Command::new(env::current_exe().unwrap())
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_DIR, dir)
        .status()
        .unwrap()
}

fn file_logger(dir: &Path, threshold: Severity) -> Logger {
    let display = SinkTarget::File(dir.join("display.log")).resolve().unwrap();
    let journal = SinkTarget::File(dir.join("journal.log")).resolve().unwrap();
    Logger::builder()
        .threshold(threshold)
        .display(display)
        .journal(journal)
        .indicator(NoopIndicator)
        .build()
}

// ============================================================================
// Children (no-ops unless spawned by a parent test)
// ============================================================================

#[test]
fn child_fail() {
    let Some(dir) = child_dir() else { return };
    let logger = file_logger(&dir, Severity::Informational);
    logger.info("working");
    fail_log!(logger, "cannot continue: {}", "disk gone");
}

#[test]
fn child_fail_silent() {
    let Some(dir) = child_dir() else { return };
    let logger = file_logger(&dir, Severity::Silent);
    logger.fail("hidden failure");
}

#[test]
fn child_alert_fatal() {
    let Some(dir) = child_dir() else { return };
    let sink = SinkTarget::File(dir.join("alert.log")).resolve().unwrap();
    AlertLog::new(sink).fatal("unrecoverable");
}

#[test]
fn child_alert_abort() {
    let Some(dir) = child_dir() else { return };
    let sink = SinkTarget::File(dir.join("alert.log")).resolve().unwrap();
    let error = std::io::Error::other("socket closed");
    AlertLog::new(sink).abort(&error);
}

// ============================================================================
// Parents
// ============================================================================

/// A failure exits with status 1 after reaching display and journal.
#[test]
fn failure_terminates_after_both_sinks_written() {
    if child_dir().is_some() {
        return;
    }
    let dir = TempLogDir::new().unwrap();

    let status = run_child("child_fail", dir.path());

    assert_eq!(status.code(), Some(FAILURE_EXIT_CODE));
    assert_eq!(
        dir.read("display.log"),
        "working\ncannot continue: disk gone\n"
    );
    let journal = dir.read("journal.log");
    let lines: Vec<&str> = journal.lines().map(strip_stamp).collect();
    assert_eq!(lines, ["USER: working", "FAIL: cannot continue: disk gone"]);
}

/// A silent threshold hides the failure but it is still journaled.
#[test]
fn silent_failure_is_journaled() {
    if child_dir().is_some() {
        return;
    }
    let dir = TempLogDir::new().unwrap();

    let status = run_child("child_fail_silent", dir.path());

    assert_eq!(status.code(), Some(FAILURE_EXIT_CODE));
    assert_eq!(dir.read("display.log"), "");
    assert_eq!(
        strip_stamp(dir.read("journal.log").trim_end()),
        "FAIL: hidden failure"
    );
}

/// Alert fatal writes a located alert and exits with status 1.
#[test]
fn alert_fatal_exits() {
    if child_dir().is_some() {
        return;
    }
    let dir = TempLogDir::new().unwrap();

    let status = run_child("child_alert_fatal", dir.path());

    assert_eq!(status.code(), Some(FAILURE_EXIT_CODE));
    let alert = dir.read("alert.log");
    assert!(alert.starts_with("ALERT "), "{alert}");
    assert!(alert.contains("fatal_exit.rs:"), "{alert}");
    assert!(alert.ends_with("unrecoverable\n"), "{alert}");
}

/// Abort prints the header and the error before exiting.
#[test]
fn alert_abort_prints_error_chain() {
    if child_dir().is_some() {
        return;
    }
    let dir = TempLogDir::new().unwrap();

    let status = run_child("child_alert_abort", dir.path());

    assert_eq!(status.code(), Some(FAILURE_EXIT_CODE));
    let alert = dir.read("alert.log");
    assert!(
        alert.contains("Aborting program execution due to error(s):\nsocket closed"),
        "{alert}"
    );
}

//! crates/logging/src/macros.rs
//! Call-site helpers that build an [`Entry`](crate::Entry) from macro
//! arguments.
//!
//! Every leveled macro accepts the same argument shapes after the logger:
//!
//! - nothing: a no-op, nothing is recorded;
//! - `err = <expr>`: an error value, rendered as `ERROR: <error>`;
//! - a single expression: emitted verbatim, never treated as a format string;
//! - a format literal followed by arguments: formatted with `format_args!`.
//!
//! ```
//! use logging::{Logger, user_log, warn_log};
//! use logging_sink::SharedSink;
//! use test_support::CaptureBuffer;
//!
//! let display = CaptureBuffer::new();
//! let logger = Logger::builder()
//!     .display(SharedSink::new(display.clone()))
//!     .build();
//!
//! user_log!(logger);
//! user_log!(logger, "100% {done}");
//! user_log!(logger, "{} files", 3);
//! warn_log!(logger, err = std::io::Error::other("disk full"));
//!
//! assert_eq!(
//!     display.contents(),
//!     "100% {done}\n3 files\nWARN: ERROR: disk full\n"
//! );
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __entry {
    (err = $error:expr $(,)?) => {
        $crate::Entry::error(&$error)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Entry::formatted(::std::format_args!($fmt, $($arg)+))
    };
    ($message:expr $(,)?) => {
        $crate::Entry::from($message)
    };
}

/// Records a debug entry on a logger.
#[macro_export]
macro_rules! debug_log {
    ($logger:expr $(,)?) => {{
        let _ = &$logger;
    }};
    ($logger:expr, $($rest:tt)+) => {
        $logger.debug($crate::__entry!($($rest)+))
    };
}

/// Records a user entry on a logger.
#[macro_export]
macro_rules! user_log {
    ($logger:expr $(,)?) => {{
        let _ = &$logger;
    }};
    ($logger:expr, $($rest:tt)+) => {
        $logger.info($crate::__entry!($($rest)+))
    };
}

/// Records a warning on a logger.
#[macro_export]
macro_rules! warn_log {
    ($logger:expr $(,)?) => {{
        let _ = &$logger;
    }};
    ($logger:expr, $($rest:tt)+) => {
        $logger.warn($crate::__entry!($($rest)+))
    };
}

/// Records a failure on a logger and exits; without arguments, does nothing.
#[macro_export]
macro_rules! fail_log {
    ($logger:expr $(,)?) => {{
        let _ = &$logger;
    }};
    ($logger:expr, $($rest:tt)+) => {
        $logger.fail($crate::__entry!($($rest)+))
    };
}

/// Starts a task on a logger.
#[macro_export]
macro_rules! start_task {
    ($logger:expr $(,)?) => {{
        let _ = &$logger;
    }};
    ($logger:expr, $($rest:tt)+) => {
        $logger.start_task($crate::__entry!($($rest)+))
    };
}

/// Completes the current task on a logger.
///
/// Without a message the completion reads `<task> ... Done.`.
#[macro_export]
macro_rules! complete_task {
    ($logger:expr $(,)?) => {
        $logger.complete_task(::std::option::Option::None)
    };
    ($logger:expr, $($rest:tt)+) => {
        $logger.complete_task(::std::option::Option::Some($crate::__entry!($($rest)+)))
    };
}

/// Prints on the process-wide debugger when it is enabled.
#[macro_export]
macro_rules! debug_print {
    ($($rest:tt)+) => {
        if $crate::debug::is_enabled() {
            $crate::debug::print($crate::__entry!($($rest)+));
        }
    };
}

/// Asserts on the process-wide debugger when it is enabled.
#[macro_export]
macro_rules! debug_assert_log {
    ($condition:expr, $($rest:tt)+) => {
        if $crate::debug::is_enabled() {
            $crate::debug::assert($condition, $crate::__entry!($($rest)+));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Entry, Logger, NoopIndicator};
    use logging_sink::SharedSink;
    use test_support::{CaptureBuffer, strip_stamp};

    fn logger() -> (Logger, CaptureBuffer, CaptureBuffer) {
        let display = CaptureBuffer::new();
        let journal = CaptureBuffer::new();
        let logger = Logger::builder()
            .threshold(crate::Severity::Debug)
            .display(SharedSink::new(display.clone()))
            .journal(SharedSink::new(journal.clone()))
            .indicator(NoopIndicator)
            .build();
        (logger, display, journal)
    }

    #[test]
    fn zero_arguments_record_nothing() {
        let (logger, display, journal) = logger();

        debug_log!(logger);
        user_log!(logger);
        warn_log!(logger);
        fail_log!(logger);
        start_task!(logger);

        assert!(display.is_empty());
        assert!(journal.is_empty());
        assert_eq!(logger.current_task(), "");
    }

    #[test]
    fn lone_string_is_not_a_format_string() {
        let (logger, display, _) = logger();
        let raw = "50% {x}";

        user_log!(logger, raw);

        assert_eq!(display.contents(), "50% {x}\n");
    }

    #[test]
    fn format_arguments_are_applied() {
        let (logger, display, _) = logger();

        debug_log!(logger, "{}/{}", 1, 2);

        assert_eq!(display.contents(), "DEBUG: 1/2\n");
    }

    #[test]
    fn error_form_renders_error_prefix() {
        let (logger, _, journal) = logger();
        let error = std::io::Error::other("refused");

        warn_log!(logger, err = error);

        assert_eq!(strip_stamp(&journal.contents()), "WARN: ERROR: refused\n");
    }

    #[test]
    fn task_macros_drive_lifecycle() {
        let (logger, display, _) = logger();
        logger.set_threshold(crate::Severity::Informational);

        start_task!(logger, "Step {}", 1);
        complete_task!(logger, "{} warnings", 0);
        start_task!(logger, "Step 2");
        complete_task!(logger);

        assert_eq!(
            display.contents(),
            "Step 1 ... 0 warnings\nStep 2 ... Done.\n"
        );
    }

    #[test]
    fn entry_helper_matches_constructors() {
        assert_eq!(__entry!("plain"), Entry::plain("plain"));
        assert_eq!(__entry!("{}", 7), Entry::Formatted("7".to_owned()));
    }
}

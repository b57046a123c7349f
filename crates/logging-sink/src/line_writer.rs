//! crates/logging-sink/src/line_writer.rs
//!
//! Prefixed, timestamped line output on top of a [`SharedSink`].

use std::io;
use std::panic::Location;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::line_mode::LineMode;
use crate::sink::SharedSink;

/// Timestamp rendered at the start of every line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Stamp {
    /// No timestamp.
    None,
    /// `YYYY/MM/DD HH:MM:SS` in local time, falling back to UTC when the
    /// local offset cannot be determined.
    #[default]
    Standard,
    /// `YYYY/MM/DD HH:MM:SS` in UTC.
    Utc,
    /// `YYYY/MM/DD HH:MM:SS.ffffff` in local time.
    Micros,
}

impl Stamp {
    /// Renders the timestamp for `now`, including the trailing separator.
    #[must_use]
    pub fn render_at(self, now: OffsetDateTime) -> String {
        let rendered = match self {
            Self::None => return String::new(),
            Self::Standard | Self::Utc => {
                now.format(format_description!("[year]/[month]/[day] [hour]:[minute]:[second]"))
            }
            Self::Micros => now.format(format_description!(
                "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond digits:6]"
            )),
        };
        rendered
            .map(|mut text| {
                text.push(' ');
                text
            })
            .unwrap_or_default()
    }

    /// Renders the timestamp for the current instant.
    #[must_use]
    pub fn render(self) -> String {
        let now = match self {
            Self::None => return String::new(),
            Self::Utc => OffsetDateTime::now_utc(),
            Self::Standard | Self::Micros => {
                OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
            }
        };
        self.render_at(now)
    }
}

/// How the caller's source location is rendered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CallerStyle {
    /// Location is omitted.
    #[default]
    None,
    /// `file.rs:12: ` using the final path component only.
    Short,
    /// `src/path/file.rs:12: ` using the full path recorded by the compiler.
    Long,
}

impl CallerStyle {
    fn render(self, location: &Location<'_>) -> String {
        match self {
            Self::None => String::new(),
            Self::Short => {
                let file = location.file();
                let short = file.rsplit(['/', '\\']).next().unwrap_or(file);
                format!("{short}:{}: ", location.line())
            }
            Self::Long => format!("{}:{}: ", location.file(), location.line()),
        }
    }
}

/// Line-oriented logger writing `prefix + timestamp + caller + message`.
///
/// Each call to [`output`](Self::output) produces exactly one write to the
/// sink, so lines from concurrent callers never interleave. The sink can be
/// replaced at any time via [`set_sink`](Self::set_sink); callers that need
/// the replacement to be observed atomically by other threads keep the
/// writer behind their own lock.
#[derive(Clone, Debug)]
pub struct LineWriter {
    sink: SharedSink,
    prefix: String,
    stamp: Stamp,
    caller: CallerStyle,
    line_mode: LineMode,
}

impl LineWriter {
    /// Creates a writer with the given prefix and timestamp style.
    pub fn new(sink: SharedSink, prefix: impl Into<String>, stamp: Stamp) -> Self {
        Self {
            sink,
            prefix: prefix.into(),
            stamp,
            caller: CallerStyle::None,
            line_mode: LineMode::WithNewline,
        }
    }

    /// Sets how the caller location is rendered.
    #[must_use]
    pub fn with_caller(mut self, caller: CallerStyle) -> Self {
        self.caller = caller;
        self
    }

    /// Returns the configured line prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the sink currently receiving lines.
    pub const fn sink(&self) -> &SharedSink {
        &self.sink
    }

    /// Replaces the sink receiving lines.
    pub fn set_sink(&mut self, sink: SharedSink) {
        self.sink = sink;
    }

    /// Replaces the timestamp style.
    pub fn set_stamp(&mut self, stamp: Stamp) {
        self.stamp = stamp;
    }

    /// Replaces the caller style.
    pub fn set_caller(&mut self, caller: CallerStyle) {
        self.caller = caller;
    }

    /// Renders the complete line without writing it.
    pub fn format_line(&self, location: Option<&Location<'_>>, message: &str) -> String {
        let mut line = String::with_capacity(self.prefix.len() + message.len() + 32);
        line.push_str(&self.prefix);
        line.push_str(&self.stamp.render());
        if let Some(location) = location {
            line.push_str(&self.caller.render(location));
        }
        line.push_str(message);
        self.line_mode.terminate(&mut line);
        line
    }

    /// Writes `message` as one line.
    pub fn output(&self, message: &str) -> io::Result<()> {
        self.output_at(None, message)
    }

    /// Writes `message` as one line, rendering `location` per the caller style.
    pub fn output_at(&self, location: Option<&Location<'_>>, message: &str) -> io::Result<()> {
        let line = self.format_line(location, message);
        self.sink.write_record(line.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::CaptureBuffer;
    use time::macros::datetime;

    fn writer(prefix: &str, stamp: Stamp) -> (LineWriter, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let writer = LineWriter::new(SharedSink::new(buffer.clone()), prefix, stamp);
        (writer, buffer)
    }

    #[test]
    fn standard_stamp_matches_classic_layout() {
        let now = datetime!(2009-11-10 23:00:00 UTC);
        assert_eq!(Stamp::Standard.render_at(now), "2009/11/10 23:00:00 ");
    }

    #[test]
    fn micros_stamp_includes_subseconds() {
        let now = datetime!(2009-11-10 23:00:00.000123 UTC);
        assert_eq!(Stamp::Micros.render_at(now), "2009/11/10 23:00:00.000123 ");
    }

    #[test]
    fn none_stamp_is_empty() {
        assert!(Stamp::None.render().is_empty());
    }

    #[test]
    fn output_writes_prefix_and_newline() {
        let (writer, buffer) = writer("ALERT ", Stamp::None);
        writer.output("careful").unwrap();
        assert_eq!(buffer.contents(), "ALERT careful\n");
    }

    #[test]
    fn output_keeps_existing_newline() {
        let (writer, buffer) = writer("", Stamp::None);
        writer.output("already terminated\n").unwrap();
        assert_eq!(buffer.contents(), "already terminated\n");
    }

    #[test]
    fn standard_stamp_precedes_message() {
        let (writer, buffer) = writer("", Stamp::Utc);
        writer.output("stamped").unwrap();
        let contents = buffer.contents();
        // "YYYY/MM/DD HH:MM:SS " is 20 bytes.
        assert_eq!(&contents[4..5], "/");
        assert_eq!(&contents[20..], "stamped\n");
    }

    #[test]
    fn short_caller_uses_file_name() {
        let (writer, buffer) = writer("", Stamp::None);
        let writer = writer.with_caller(CallerStyle::Short);
        writer.output_at(Some(Location::caller()), "here").unwrap();
        let contents = buffer.contents();
        assert!(contents.starts_with("line_writer.rs:"), "{contents}");
        assert!(contents.ends_with(": here\n"));
    }

    #[test]
    fn long_caller_uses_full_path() {
        let (writer, buffer) = writer("", Stamp::None);
        let writer = writer.with_caller(CallerStyle::Long);
        writer.output_at(Some(Location::caller()), "here").unwrap();
        assert!(buffer.contents().contains("src/line_writer.rs:"));
    }

    #[test]
    fn set_sink_redirects_later_lines() {
        let (mut writer, first) = writer("", Stamp::None);
        writer.output("old").unwrap();

        let second = CaptureBuffer::new();
        writer.set_sink(SharedSink::new(second.clone()));
        writer.output("new").unwrap();

        assert_eq!(first.contents(), "old\n");
        assert_eq!(second.contents(), "new\n");
    }
}

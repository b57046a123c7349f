//! crates/logging/src/indicator.rs
//! Progress indicators shown while a task is running.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use logging_sink::SharedSink;

/// Frames drawn by [`Spinner`], in order.
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Delay between two spinner frames.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Control sequence that returns the cursor and clears the line.
pub const ERASE_LINE: &[u8] = b"\r\x1b[K";

/// Visual indicator attached to the current task.
///
/// The logger calls [`restart`](Self::restart) when a task starts and
/// [`stop`](Self::stop) whenever a task completes or a warning or failure
/// interrupts it. `stop` must be idempotent.
pub trait TaskIndicator: Send {
    /// Starts (or restarts) the indicator with the given line prefix.
    fn restart(&mut self, prefix: &str);

    /// Stops the indicator if it is running.
    fn stop(&mut self);

    /// Moves the indicator to a new display sink.
    ///
    /// Indicators that do not draw anything can ignore this.
    fn retarget(&mut self, _sink: &SharedSink) {}
}

/// Indicator that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopIndicator;

impl TaskIndicator for NoopIndicator {
    fn restart(&mut self, _prefix: &str) {}

    fn stop(&mut self) {}
}

/// Event observed by a [`RecordingIndicator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndicatorEvent {
    /// `restart` was called with this prefix.
    Restart(String),
    /// `stop` was called.
    Stop,
}

/// Indicator that records every call, for tests and headless front ends.
///
/// Clones share the same event log, so one clone can be handed to a logger
/// while another is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingIndicator {
    events: Arc<Mutex<Vec<IndicatorEvent>>>,
}

impl RecordingIndicator {
    /// Creates an indicator with an empty event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    pub fn events(&self) -> Vec<IndicatorEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reports whether the last recorded call was a restart.
    pub fn is_active(&self) -> bool {
        matches!(self.events().last(), Some(IndicatorEvent::Restart(_)))
    }

    fn push(&self, event: IndicatorEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl TaskIndicator for RecordingIndicator {
    fn restart(&mut self, prefix: &str) {
        self.push(IndicatorEvent::Restart(prefix.to_owned()));
    }

    fn stop(&mut self) {
        self.push(IndicatorEvent::Stop);
    }
}

struct Animation {
    prefix: String,
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Terminal spinner drawn by a background thread.
///
/// The spinner only animates when its sink is a terminal (unless
/// [`force_animation`](Self::force_animation) was requested), so redirected
/// output never contains carriage returns or escape sequences.
pub struct Spinner {
    sink: SharedSink,
    interval: Duration,
    forced: bool,
    animation: Option<Animation>,
}

impl Spinner {
    /// Creates a stopped spinner drawing on `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self {
            sink,
            interval: SPINNER_INTERVAL,
            forced: false,
            animation: None,
        }
    }

    /// Animates even when the sink is not a terminal.
    #[must_use]
    pub fn force_animation(mut self) -> Self {
        self.forced = true;
        self
    }

    /// Overrides the delay between frames.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Reports whether the animation thread is running.
    pub fn is_spinning(&self) -> bool {
        self.animation.is_some()
    }

    fn spawn(&self, prefix: String) -> Option<Animation> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let sink = self.sink.clone();
        let interval = self.interval;
        let drawn = prefix.clone();

        let handle = thread::Builder::new()
            .name("applog-spinner".to_owned())
            .spawn(move || {
                for frame in SPINNER_FRAMES.iter().cycle() {
                    if !flag.load(Ordering::Acquire) {
                        break;
                    }
                    let _ = sink.write_record(format!("\r{drawn}{frame}").as_bytes());
                    let _ = sink.flush();
                    thread::park_timeout(interval);
                }
            })
            .ok()?;

        Some(Animation {
            prefix,
            running,
            handle,
        })
    }
}

impl TaskIndicator for Spinner {
    fn restart(&mut self, prefix: &str) {
        self.stop();
        if self.forced || self.sink.is_terminal() {
            self.animation = self.spawn(prefix.to_owned());
        }
    }

    fn stop(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.running.store(false, Ordering::Release);
            animation.handle.thread().unpark();
            let _ = animation.handle.join();
            let _ = self.sink.write_record(ERASE_LINE);
            let _ = self.sink.flush();
        }
    }

    fn retarget(&mut self, sink: &SharedSink) {
        let prefix = self.animation.as_ref().map(|animation| animation.prefix.clone());
        self.stop();
        self.sink = sink.clone();
        if let Some(prefix) = prefix {
            self.restart(&prefix);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spinner")
            .field("sink", &self.sink)
            .field("interval", &self.interval)
            .field("spinning", &self.is_spinning())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::CaptureBuffer;

    #[test]
    fn recording_indicator_tracks_calls() {
        let recorder = RecordingIndicator::new();
        let mut indicator = recorder.clone();

        indicator.restart("sync ... ");
        assert!(recorder.is_active());
        indicator.stop();

        assert_eq!(
            recorder.events(),
            vec![
                IndicatorEvent::Restart("sync ... ".to_owned()),
                IndicatorEvent::Stop
            ]
        );
        assert!(!recorder.is_active());
    }

    #[test]
    fn spinner_stays_idle_on_non_terminal_sink() {
        let buffer = CaptureBuffer::new();
        let mut spinner = Spinner::new(SharedSink::new(buffer.clone()));

        spinner.restart("copy ... ");
        assert!(!spinner.is_spinning());
        spinner.stop();

        assert!(buffer.is_empty());
    }

    #[test]
    fn forced_spinner_draws_frames_and_erases_on_stop() {
        let buffer = CaptureBuffer::new();
        let mut spinner = Spinner::new(SharedSink::new(buffer.clone()))
            .force_animation()
            .with_interval(Duration::from_millis(5));

        spinner.restart("copy ... ");
        assert!(spinner.is_spinning());
        thread::sleep(Duration::from_millis(40));
        spinner.stop();
        assert!(!spinner.is_spinning());

        let contents = buffer.contents();
        assert!(contents.starts_with("\rcopy ... |"), "{contents:?}");
        assert!(contents.ends_with("\r\x1b[K"));
    }

    #[test]
    fn restart_replaces_running_animation() {
        let buffer = CaptureBuffer::new();
        let mut spinner = Spinner::new(SharedSink::new(buffer.clone()))
            .force_animation()
            .with_interval(Duration::from_millis(5));

        spinner.restart("first ... ");
        spinner.restart("second ... ");
        thread::sleep(Duration::from_millis(40));
        spinner.stop();

        let contents = buffer.contents();
        let erase_count = contents.matches("\r\x1b[K").count();
        assert_eq!(erase_count, 2);
        assert!(contents.contains("second ... "));
    }

    #[test]
    fn retarget_moves_running_animation() {
        let old = CaptureBuffer::new();
        let new = CaptureBuffer::new();
        let mut spinner = Spinner::new(SharedSink::new(old.clone()))
            .force_animation()
            .with_interval(Duration::from_millis(5));

        spinner.restart("copy ... ");
        thread::sleep(Duration::from_millis(20));
        spinner.retarget(&SharedSink::new(new.clone()));
        assert!(spinner.is_spinning());
        let erased_old = old.contents();
        thread::sleep(Duration::from_millis(20));
        spinner.stop();

        assert!(erased_old.ends_with("\r\x1b[K"), "{erased_old:?}");
        assert_eq!(old.contents(), erased_old);
        let contents = new.contents();
        assert!(contents.starts_with("\rcopy ... "), "{contents:?}");
        assert!(contents.ends_with("\r\x1b[K"));
    }

    #[test]
    fn retarget_of_idle_spinner_only_swaps_sink() {
        let old = CaptureBuffer::new();
        let new = CaptureBuffer::new();
        let mut spinner = Spinner::new(SharedSink::new(old.clone()))
            .force_animation()
            .with_interval(Duration::from_millis(5));

        spinner.retarget(&SharedSink::new(new.clone()));
        assert!(!spinner.is_spinning());
        spinner.restart("scan ... ");
        thread::sleep(Duration::from_millis(20));
        spinner.stop();

        assert!(old.is_empty());
        assert!(new.contents().starts_with("\rscan ... "));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut spinner = Spinner::new(SharedSink::discard());
        spinner.stop();
        spinner.stop();
        assert!(!spinner.is_spinning());
    }
}

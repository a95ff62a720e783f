//! Cooperative capture loop.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::CancellationSignal;
use crate::capture::{CaptureFilter, FrameSource};
use crate::classifier::FrameClassifier;
use crate::reporter::EventSink;

/// Length of one bounded capture call.
pub const DEFAULT_CAPTURE_WINDOW: Duration = Duration::from_secs(1);

/// Runs one classifier over one filtered frame source.
///
/// The signal is checked only between capture calls, so a worker stops at
/// most one capture window after the signal is set.
pub struct CaptureWorker {
    filter: CaptureFilter,
    classifier: Arc<dyn FrameClassifier>,
    source: Box<dyn FrameSource>,
    signal: CancellationSignal,
    sink: Arc<dyn EventSink>,
    window: Duration,
}

impl CaptureWorker {
    pub fn new(
        filter: CaptureFilter,
        classifier: Arc<dyn FrameClassifier>,
        source: Box<dyn FrameSource>,
        signal: CancellationSignal,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            filter,
            classifier,
            source,
            signal,
            sink,
            window: DEFAULT_CAPTURE_WINDOW,
        }
    }

    /// Set the length of each capture call.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Run the loop on a new named thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        let name = format!("capture-{}-{}", self.filter, self.classifier.name());
        thread::Builder::new().name(name).spawn(move || self.run())
    }

    /// Run the loop on the current thread until cancelled.
    pub fn run(mut self) {
        info!(
            "Capture worker started: filter={} classifier={} interface={}",
            self.filter,
            self.classifier.name(),
            self.source.interface_name()
        );

        while !self.signal.is_cancelled() {
            let started = Instant::now();

            match self.source.poll(self.window) {
                Ok(frames) => {
                    debug!("{} frames in window", frames.len());
                    for frame in frames.iter().filter(|f| self.filter.matches(f)) {
                        for event in self.classifier.classify(frame) {
                            if event.is_alert() {
                                warn!("{}", event);
                            }
                            self.sink.emit(&event.to_string());
                        }
                    }
                }
                Err(e) => {
                    warn!("Capture failed on {}: {}", self.source.interface_name(), e);
                    self.sink.emit(&format!(
                        "[!] Capture error on {} ({}): {}",
                        self.source.interface_name(),
                        self.filter,
                        e
                    ));
                    // A failed call still takes its full window.
                    thread::sleep(self.window.saturating_sub(started.elapsed()));
                }
            }
        }

        info!(
            "Capture worker stopped: filter={} classifier={}",
            self.filter,
            self.classifier.name()
        );
    }
}

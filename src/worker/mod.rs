//! Capture workers.
//!
//! A worker runs one frame source through one classifier on its own
//! thread until the session's cancellation signal is set.

mod capture_worker;
mod signal;

pub use capture_worker::{CaptureWorker, DEFAULT_CAPTURE_WINDOW};
pub use signal::CancellationSignal;

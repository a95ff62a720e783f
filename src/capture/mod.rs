//! Packet capture abstraction.
//!
//! This module defines the `FrameSource` trait, one bounded capture call
//! per invocation, and a pnet-based implementation. Workers depend on the
//! trait so tests can drive them with scripted frames.

mod filter;
mod pnet_capture;

pub use filter::CaptureFilter;
pub use pnet_capture::{PnetCapture, PnetCaptureFactory};

use std::time::Duration;

use crate::domain::Frame;
use crate::error::CaptureError;

/// A source of decoded frames.
pub trait FrameSource: Send {
    /// Capture for at most roughly `window`, returning every frame seen.
    ///
    /// Must return within about one window even when no traffic arrives;
    /// cooperative cancellation of workers depends on it.
    fn poll(&mut self, window: Duration) -> Result<Vec<Frame>, CaptureError>;

    /// Name of the interface being captured.
    fn interface_name(&self) -> &str;
}

/// Opens one frame source per capture worker.
pub trait CaptureFactory: Send + Sync {
    fn open(&self) -> Box<dyn FrameSource>;
}

#[cfg(test)]
pub(crate) mod scripted;

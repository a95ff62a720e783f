//! Status line output.
//!
//! This module defines the `EventSink` trait and the implementations the
//! front ends use. Lines arrive from several worker threads; no ordering
//! is promised across workers.

mod channel_reporter;
mod console_reporter;
mod memory_reporter;

pub use channel_reporter::ChannelReporter;
pub use console_reporter::ConsoleReporter;
pub use memory_reporter::MemoryReporter;

/// Receiver of human-readable status lines.
///
/// Implementations decide whether to display, buffer or discard. Lines are
/// passed without the trailing newline; line-oriented outputs add it.
pub trait EventSink: Send + Sync {
    fn emit(&self, line: &str);
}

//! Channel-backed status output for embedding front ends.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::reporter::EventSink;

/// Forwards each status line, newline-terminated, over an mpsc channel.
///
/// Lines are silently dropped once the receiving side has gone away.
#[derive(Debug)]
pub struct ChannelReporter {
    tx: Sender<String>,
}

impl ChannelReporter {
    /// Create a reporter and the receiver a UI thread should drain.
    pub fn new() -> (Self, Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelReporter {
    fn emit(&self, line: &str) {
        let _ = self.tx.send(format!("{}\n", line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_newline_terminated() {
        let (reporter, rx) = ChannelReporter::new();
        reporter.emit("[*] Starting");
        reporter.emit("[*] Stopping");

        assert_eq!(rx.recv().unwrap(), "[*] Starting\n");
        assert_eq!(rx.recv().unwrap(), "[*] Stopping\n");
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (reporter, rx) = ChannelReporter::new();
        drop(rx);
        reporter.emit("nobody listening");
    }
}

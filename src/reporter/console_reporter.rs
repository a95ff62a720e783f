//! Console-based status output.

use std::io::{self, Write};

use crate::reporter::EventSink;

/// Writes each status line to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for ConsoleReporter {
    fn emit(&self, line: &str) {
        // Holding the lock keeps concurrent workers from interleaving
        // within a line.
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
    }
}

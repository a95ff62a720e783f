//! Capture filter expressions.

use std::fmt;

use crate::domain::Frame;

/// The two filter expressions workers are bound to.
///
/// pnet delivers every frame, so the expression is evaluated in-process
/// with the same meaning as the libpcap expression of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFilter {
    /// `ip`: IPv4 traffic
    Ip,
    /// `arp`: ARP traffic
    Arp,
}

impl CaptureFilter {
    pub fn expression(&self) -> &'static str {
        match self {
            CaptureFilter::Ip => "ip",
            CaptureFilter::Arp => "arp",
        }
    }

    pub fn matches(&self, frame: &Frame) -> bool {
        match self {
            CaptureFilter::Ip => frame.is_ipv4(),
            CaptureFilter::Arp => frame.is_arp(),
        }
    }
}

impl fmt::Display for CaptureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expression())
    }
}

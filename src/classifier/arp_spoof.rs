//! ARP reply logging.

use crate::domain::{ClassificationEvent, Frame};

use super::FrameClassifier;

/// Reports every ARP reply as a spoofing candidate.
///
/// No gateway or history cross-check is done here; each reply is a
/// candidate for whatever correlates the status stream downstream.
#[derive(Debug, Default)]
pub struct ArpSpoofClassifier;

impl ArpSpoofClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl FrameClassifier for ArpSpoofClassifier {
    fn name(&self) -> &'static str {
        "arp-spoof"
    }

    fn classify(&self, frame: &Frame) -> Vec<ClassificationEvent> {
        match &frame.arp {
            Some(arp) if frame.is_arp_reply() => vec![ClassificationEvent::ArpSpoofSuspected {
                ip: arp.sender_ip,
                mac: arp.sender_mac.clone(),
            }],
            _ => Vec::new(),
        }
    }
}

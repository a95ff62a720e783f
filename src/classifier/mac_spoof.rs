//! Ethernet/ARP sender mismatch detection.

use crate::domain::{ClassificationEvent, Frame};

use super::FrameClassifier;

/// Flags ARP frames whose Ethernet source differs from the ARP sender
/// hardware address.
#[derive(Debug, Default)]
pub struct MacSpoofClassifier;

impl MacSpoofClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl FrameClassifier for MacSpoofClassifier {
    fn name(&self) -> &'static str {
        "mac-spoof"
    }

    fn classify(&self, frame: &Frame) -> Vec<ClassificationEvent> {
        let (Some(ether_mac), Some(arp)) = (frame.source_mac(), frame.arp.as_ref()) else {
            return Vec::new();
        };

        if *ether_mac == arp.sender_mac {
            return Vec::new();
        }

        vec![ClassificationEvent::MacSpoofDetected {
            ether_mac: ether_mac.clone(),
            arp_mac: arp.sender_mac.clone(),
        }]
    }
}

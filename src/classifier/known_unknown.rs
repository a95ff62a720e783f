//! Known/unknown source address classification.

use std::sync::Arc;

use crate::domain::{AddressList, ClassificationEvent, Frame};
use crate::registry::{AddressRegistry, RecordOutcome};

use super::{write_failed, FrameClassifier};

/// Checks the source address of IP traffic against the known set and
/// records anything else in the unknown file.
pub struct KnownUnknownClassifier {
    registry: Arc<AddressRegistry>,
}

impl KnownUnknownClassifier {
    pub fn new(registry: Arc<AddressRegistry>) -> Self {
        Self { registry }
    }
}

impl FrameClassifier for KnownUnknownClassifier {
    fn name(&self) -> &'static str {
        "known-unknown"
    }

    fn classify(&self, frame: &Frame) -> Vec<ClassificationEvent> {
        let (Some(mac), Some(ip)) = (frame.source_mac(), frame.network_source) else {
            return Vec::new();
        };

        if self.registry.is_known(mac) {
            return vec![ClassificationEvent::KnownSeen {
                mac: mac.clone(),
                ip,
            }];
        }

        match self.registry.record_unknown_if_new(mac) {
            Ok(RecordOutcome::Added) => vec![ClassificationEvent::UnknownAdded { mac: mac.clone() }],
            Ok(RecordOutcome::AlreadyPresent) => {
                vec![ClassificationEvent::UnknownDuplicate { mac: mac.clone() }]
            }
            Ok(RecordOutcome::NoFileConfigured) => Vec::new(),
            Err(e) => vec![write_failed(mac, AddressList::Unknown, e)],
        }
    }
}

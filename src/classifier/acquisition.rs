//! Address acquisition into the known file.

use std::sync::Arc;

use crate::domain::{AddressList, ClassificationEvent, Frame};
use crate::registry::{AddressRegistry, RecordOutcome};

use super::{write_failed, FrameClassifier};

/// Records every observed source address in the known file.
pub struct AcquisitionClassifier {
    registry: Arc<AddressRegistry>,
}

impl AcquisitionClassifier {
    pub fn new(registry: Arc<AddressRegistry>) -> Self {
        Self { registry }
    }
}

impl FrameClassifier for AcquisitionClassifier {
    fn name(&self) -> &'static str {
        "acquisition"
    }

    fn classify(&self, frame: &Frame) -> Vec<ClassificationEvent> {
        let Some(mac) = frame.source_mac() else {
            return Vec::new();
        };

        let event = match self.registry.record_known_if_new(mac) {
            Ok(RecordOutcome::Added) => ClassificationEvent::KnownAdded { mac: mac.clone() },
            Ok(RecordOutcome::AlreadyPresent) => {
                ClassificationEvent::KnownDuplicate { mac: mac.clone() }
            }
            Ok(RecordOutcome::NoFileConfigured) => ClassificationEvent::NoTargetFile,
            Err(e) => write_failed(mac, AddressList::Known, e),
        };

        vec![event]
    }
}

//! Frame classification.
//!
//! Each classifier turns one decoded frame into zero or more
//! `ClassificationEvent`s. Classifiers that persist addresses go through
//! the shared `AddressRegistry`; the spoof detectors are stateless.

mod acquisition;
mod arp_spoof;
mod known_unknown;
mod mac_spoof;

pub use acquisition::AcquisitionClassifier;
pub use arp_spoof::ArpSpoofClassifier;
pub use known_unknown::KnownUnknownClassifier;
pub use mac_spoof::MacSpoofClassifier;

use crate::domain::{AddressList, ClassificationEvent, Frame, MacAddress};
use crate::error::RegistryError;

/// A decision function over captured frames.
///
/// Implementations must be shareable across worker threads.
pub trait FrameClassifier: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Classify one frame.
    fn classify(&self, frame: &Frame) -> Vec<ClassificationEvent>;
}

fn write_failed(mac: &MacAddress, list: AddressList, err: RegistryError) -> ClassificationEvent {
    tracing::warn!("Failed to record {} in {} list: {}", mac, list, err);
    ClassificationEvent::WriteFailed {
        mac: mac.clone(),
        list,
        reason: err.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_frames {
    use std::net::{IpAddr, Ipv4Addr};

    use crate::domain::{ArpInfo, ArpOperation, Frame, LinkHeader, MacAddress};

    pub fn mac(s: &str) -> MacAddress {
        MacAddress::normalize(s).unwrap()
    }

    pub fn ip_frame(src_mac: &str, src_ip: [u8; 4]) -> Frame {
        Frame {
            link: Some(LinkHeader {
                source: mac(src_mac),
            }),
            network_source: Some(IpAddr::V4(Ipv4Addr::from(src_ip))),
            arp: None,
        }
    }

    pub fn arp_frame(ether_src: &str, sender_mac: &str, sender_ip: [u8; 4], op: ArpOperation) -> Frame {
        Frame {
            link: Some(LinkHeader {
                source: mac(ether_src),
            }),
            network_source: None,
            arp: Some(ArpInfo {
                operation: op,
                sender_mac: mac(sender_mac),
                sender_ip: IpAddr::V4(Ipv4Addr::from(sender_ip)),
            }),
        }
    }
}

//! Decoded view of one captured frame.
//!
//! Only the header fields the classifiers look at are kept.

use std::net::IpAddr;

use super::MacAddress;

/// Ethernet header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeader {
    pub source: MacAddress,
}

/// ARP operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOperation {
    Request,
    Reply,
    Other(u16),
}

impl From<u16> for ArpOperation {
    fn from(code: u16) -> Self {
        match code {
            1 => ArpOperation::Request,
            2 => ArpOperation::Reply,
            other => ArpOperation::Other(other),
        }
    }
}

/// Fields of an ARP payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpInfo {
    pub operation: ArpOperation,
    pub sender_mac: MacAddress,
    pub sender_ip: IpAddr,
}

/// A captured frame reduced to what classification needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Link-layer header, if the frame had one
    pub link: Option<LinkHeader>,
    /// Network-layer source address (IPv4 or IPv6 header)
    pub network_source: Option<IpAddr>,
    /// ARP payload, if the frame is ARP
    pub arp: Option<ArpInfo>,
}

impl Frame {
    /// Link-layer source address.
    pub fn source_mac(&self) -> Option<&MacAddress> {
        self.link.as_ref().map(|link| &link.source)
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self.network_source, Some(IpAddr::V4(_)))
    }

    pub fn is_arp(&self) -> bool {
        self.arp.is_some()
    }

    pub fn is_arp_reply(&self) -> bool {
        self.arp
            .as_ref()
            .map(|arp| arp.operation == ArpOperation::Reply)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn mac(s: &str) -> MacAddress {
        MacAddress::normalize(s).unwrap()
    }

    #[test]
    fn test_arp_operation_codes() {
        assert_eq!(ArpOperation::from(1), ArpOperation::Request);
        assert_eq!(ArpOperation::from(2), ArpOperation::Reply);
        assert_eq!(ArpOperation::from(9), ArpOperation::Other(9));
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::default();
        assert!(frame.source_mac().is_none());
        assert!(!frame.is_ipv4());
        assert!(!frame.is_arp());
        assert!(!frame.is_arp_reply());
    }

    #[test]
    fn test_arp_reply_detection() {
        let frame = Frame {
            link: Some(LinkHeader {
                source: mac("aa:11:22:33:44:55"),
            }),
            network_source: None,
            arp: Some(ArpInfo {
                operation: ArpOperation::Reply,
                sender_mac: mac("aa:11:22:33:44:55"),
                sender_ip: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            }),
        };
        assert!(frame.is_arp());
        assert!(frame.is_arp_reply());
        assert_eq!(frame.source_mac(), Some(&mac("aa:11:22:33:44:55")));
    }
}

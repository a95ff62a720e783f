//! Ethernet frame decoder built on pnet packet views.

use std::net::IpAddr;

use pnet::packet::arp::ArpPacket;
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::Packet;

use crate::domain::{ArpInfo, ArpOperation, Frame, LinkHeader, MacAddress};
use crate::error::ParseError;

/// Ethernet II header length
const ETHERNET_HEADER_LEN: usize = 14;

/// Decoder for captured Ethernet frames.
///
/// Upper layers that fail to decode are left as `None` on the frame
/// rather than failing the whole frame; the link header is still useful.
pub struct FrameParser;

impl FrameParser {
    /// Create a new frame parser.
    pub fn new() -> Self {
        Self
    }

    /// Decode one Ethernet frame.
    pub fn parse(&self, data: &[u8]) -> Result<Frame, ParseError> {
        let ethernet = EthernetPacket::new(data).ok_or(ParseError::PacketTooShort {
            expected: ETHERNET_HEADER_LEN,
            actual: data.len(),
        })?;

        let mut frame = Frame {
            link: Some(LinkHeader {
                source: MacAddress::from(ethernet.get_source()),
            }),
            ..Frame::default()
        };

        match ethernet.get_ethertype() {
            EtherTypes::Ipv4 => {
                frame.network_source = Ipv4Packet::new(ethernet.payload())
                    .map(|ipv4| IpAddr::V4(ipv4.get_source()));
            }
            EtherTypes::Ipv6 => {
                frame.network_source = Ipv6Packet::new(ethernet.payload())
                    .map(|ipv6| IpAddr::V6(ipv6.get_source()));
            }
            EtherTypes::Arp => {
                frame.arp = ArpPacket::new(ethernet.payload()).map(|arp| ArpInfo {
                    operation: ArpOperation::from(arp.get_operation().0),
                    sender_mac: MacAddress::from(arp.get_sender_hw_addr()),
                    sender_ip: IpAddr::V4(arp.get_sender_proto_addr()),
                });
            }
            _ => {}
        }

        Ok(frame)
    }
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::arp::{ArpHardwareTypes, ArpOperation as PnetArpOp, MutableArpPacket};
    use pnet::packet::ethernet::MutableEthernetPacket;
    use pnet::packet::ipv4::MutableIpv4Packet;
    use pnet::datalink::MacAddr;
    use std::net::Ipv4Addr;

    fn build_arp_frame(
        ether_src: MacAddr,
        sender_mac: MacAddr,
        sender_ip: Ipv4Addr,
        operation: u16,
    ) -> Vec<u8> {
        let mut buf = vec![0u8; 42];
        {
            let mut eth = MutableEthernetPacket::new(&mut buf).unwrap();
            eth.set_destination(MacAddr::broadcast());
            eth.set_source(ether_src);
            eth.set_ethertype(EtherTypes::Arp);
        }
        {
            let mut arp = MutableArpPacket::new(&mut buf[14..]).unwrap();
            arp.set_hardware_type(ArpHardwareTypes::Ethernet);
            arp.set_protocol_type(EtherTypes::Ipv4);
            arp.set_hw_addr_len(6);
            arp.set_proto_addr_len(4);
            arp.set_operation(PnetArpOp::new(operation));
            arp.set_sender_hw_addr(sender_mac);
            arp.set_sender_proto_addr(sender_ip);
            arp.set_target_hw_addr(MacAddr::zero());
            arp.set_target_proto_addr(Ipv4Addr::new(10, 0, 0, 1));
        }
        buf
    }

    fn build_ipv4_frame(src_mac: MacAddr, src_ip: Ipv4Addr) -> Vec<u8> {
        let mut buf = vec![0u8; 34];
        {
            let mut eth = MutableEthernetPacket::new(&mut buf).unwrap();
            eth.set_destination(MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55));
            eth.set_source(src_mac);
            eth.set_ethertype(EtherTypes::Ipv4);
        }
        {
            let mut ip = MutableIpv4Packet::new(&mut buf[14..]).unwrap();
            ip.set_version(4);
            ip.set_header_length(5);
            ip.set_total_length(20);
            ip.set_source(src_ip);
            ip.set_destination(Ipv4Addr::new(192, 168, 1, 1));
        }
        buf
    }

    #[test]
    fn test_parse_too_short() {
        let parser = FrameParser::new();
        let result = parser.parse(&[0u8; 10]);
        assert!(matches!(
            result,
            Err(ParseError::PacketTooShort { expected: 14, actual: 10 })
        ));
    }

    #[test]
    fn test_parse_ipv4_frame() {
        let parser = FrameParser::new();
        let data = build_ipv4_frame(
            MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff),
            Ipv4Addr::new(192, 168, 1, 42),
        );

        let frame = parser.parse(&data).unwrap();
        assert_eq!(frame.source_mac().unwrap().as_str(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(
            frame.network_source,
            Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42)))
        );
        assert!(frame.is_ipv4());
        assert!(frame.arp.is_none());
    }

    #[test]
    fn test_parse_arp_reply() {
        let parser = FrameParser::new();
        let data = build_arp_frame(
            MacAddr::new(0xaa, 0x11, 0x22, 0x33, 0x44, 0x55),
            MacAddr::new(0xaa, 0x11, 0x22, 0x33, 0x44, 0x55),
            Ipv4Addr::new(10, 0, 0, 5),
            2,
        );

        let frame = parser.parse(&data).unwrap();
        let arp = frame.arp.as_ref().unwrap();
        assert_eq!(arp.operation, ArpOperation::Reply);
        assert_eq!(arp.sender_mac.as_str(), "aa:11:22:33:44:55");
        assert_eq!(arp.sender_ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
        assert!(frame.network_source.is_none());
    }

    #[test]
    fn test_parse_arp_request() {
        let parser = FrameParser::new();
        let data = build_arp_frame(
            MacAddr::new(0xaa, 0x11, 0x22, 0x33, 0x44, 0x55),
            MacAddr::new(0xaa, 0x11, 0x22, 0x33, 0x44, 0x55),
            Ipv4Addr::new(10, 0, 0, 5),
            1,
        );

        let frame = parser.parse(&data).unwrap();
        assert_eq!(frame.arp.unwrap().operation, ArpOperation::Request);
    }

    #[test]
    fn test_truncated_arp_keeps_link_header() {
        let parser = FrameParser::new();
        let mut data = build_arp_frame(
            MacAddr::new(0xaa, 0x11, 0x22, 0x33, 0x44, 0x55),
            MacAddr::new(0xaa, 0x11, 0x22, 0x33, 0x44, 0x55),
            Ipv4Addr::new(10, 0, 0, 5),
            2,
        );
        data.truncate(20);

        let frame = parser.parse(&data).unwrap();
        assert!(frame.link.is_some());
        assert!(frame.arp.is_none());
    }
}

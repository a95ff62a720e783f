//! Classification events and their status-line rendering.

use std::fmt;
use std::net::IpAddr;

use super::MacAddress;

/// Which address list a registry write targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressList {
    Known,
    Unknown,
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressList::Known => write!(f, "known"),
            AddressList::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of classifying a single frame.
///
/// Events carry only their payload and are consumed immediately by an
/// event sink, usually through their `Display` rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationEvent {
    /// Source address is in the known set
    KnownSeen { mac: MacAddress, ip: IpAddr },
    /// Source address was new and got appended to the unknown file
    UnknownAdded { mac: MacAddress },
    /// Source address was already recorded as unknown
    UnknownDuplicate { mac: MacAddress },
    /// An ARP reply was observed; candidate for downstream correlation
    ArpSpoofSuspected { ip: IpAddr, mac: MacAddress },
    /// Ethernet source differs from the ARP sender hardware address
    MacSpoofDetected {
        ether_mac: MacAddress,
        arp_mac: MacAddress,
    },
    /// Acquisition appended a new address to the known file
    KnownAdded { mac: MacAddress },
    /// Acquisition saw an address already in the known file
    KnownDuplicate { mac: MacAddress },
    /// Acquisition has nowhere to write
    NoTargetFile,
    /// Appending to an address file failed
    WriteFailed {
        mac: MacAddress,
        list: AddressList,
        reason: String,
    },
}

impl ClassificationEvent {
    /// Whether this event reports a possible attack.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            ClassificationEvent::ArpSpoofSuspected { .. }
                | ClassificationEvent::MacSpoofDetected { .. }
        )
    }
}

impl fmt::Display for ClassificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationEvent::KnownSeen { mac, ip } => {
                write!(f, "[+] Known MAC address detected: {} (IP: {})", mac, ip)
            }
            ClassificationEvent::UnknownAdded { mac } => {
                write!(f, "[*] Added unknown MAC address: {}", mac)
            }
            ClassificationEvent::UnknownDuplicate { mac } => {
                write!(f, "[!] Unknown MAC address already logged: {}", mac)
            }
            ClassificationEvent::ArpSpoofSuspected { ip, mac } => {
                write!(f, "[!] ARP Spoofing Check: IP={}, MAC={}", ip, mac)
            }
            ClassificationEvent::MacSpoofDetected { ether_mac, arp_mac } => write!(
                f,
                "[!] MAC Spoofing detected! Ethernet MAC: {}, ARP MAC: {}",
                ether_mac, arp_mac
            ),
            ClassificationEvent::KnownAdded { mac } => {
                write!(f, "[+] MAC address written to file: {}", mac)
            }
            ClassificationEvent::KnownDuplicate { mac } => {
                write!(f, "[*] MAC address already exists: {}", mac)
            }
            ClassificationEvent::NoTargetFile => {
                write!(f, "[!] Known MAC file not set. Please select a file first.")
            }
            ClassificationEvent::WriteFailed { mac, list, reason } => write!(
                f,
                "[!] Error writing {} to {} MAC file: {}",
                mac, list, reason
            ),
        }
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
    fn test_known_seen_line() {
        let event = ClassificationEvent::KnownSeen {
            mac: mac("aa:bb:cc:dd:ee:ff"),
            ip: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)),
        };
        assert_eq!(
            event.to_string(),
            "[+] Known MAC address detected: aa:bb:cc:dd:ee:ff (IP: 192.168.1.10)"
        );
        assert!(!event.is_alert());
    }

    #[test]
    fn test_arp_spoof_line() {
        let event = ClassificationEvent::ArpSpoofSuspected {
            ip: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            mac: mac("aa:11:22:33:44:55"),
        };
        assert_eq!(
            event.to_string(),
            "[!] ARP Spoofing Check: IP=10.0.0.5, MAC=aa:11:22:33:44:55"
        );
        assert!(event.is_alert());
    }

    #[test]
    fn test_mac_spoof_is_alert() {
        let event = ClassificationEvent::MacSpoofDetected {
            ether_mac: mac("aa:aa:aa:aa:aa:aa"),
            arp_mac: mac("bb:bb:bb:bb:bb:bb"),
        };
        assert!(event.is_alert());
        assert!(event.to_string().contains("Ethernet MAC: aa:aa:aa:aa:aa:aa"));
    }

    #[test]
    fn test_write_failed_names_list() {
        let event = ClassificationEvent::WriteFailed {
            mac: mac("11:22:33:44:55:66"),
            list: AddressList::Unknown,
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "[!] Error writing 11:22:33:44:55:66 to unknown MAC file: permission denied"
        );
    }

    #[test]
    fn test_lines_are_single_line() {
        let events = vec![
            ClassificationEvent::UnknownAdded { mac: mac("11:22:33:44:55:66") },
            ClassificationEvent::UnknownDuplicate { mac: mac("11:22:33:44:55:66") },
            ClassificationEvent::KnownAdded { mac: mac("11:22:33:44:55:66") },
            ClassificationEvent::KnownDuplicate { mac: mac("11:22:33:44:55:66") },
            ClassificationEvent::NoTargetFile,
        ];
        for event in events {
            assert!(!event.to_string().contains('\n'));
        }
    }
}

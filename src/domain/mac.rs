//! Normalized hardware address.

use std::fmt;
use std::str::FromStr;

use macaddr::MacAddr6;

/// A hardware address in normalized form: lowercase, colon-separated.
///
/// Equality is plain string equality after normalization. Lines that do not
/// parse as a 6-octet address are kept lowercased as-is, so address files
/// written by other tools still compare consistently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(String);

impl MacAddress {
    /// Normalize arbitrary text into a `MacAddress`.
    ///
    /// Returns `None` for blank input.
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(octets) = parse_octets(raw) {
            return Some(Self::from_octets(octets));
        }

        Some(Self(raw.to_lowercase()))
    }

    /// Build from raw octets.
    pub fn from_octets(octets: [u8; 6]) -> Self {
        Self(format_mac(&octets))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_octets(raw: &str) -> Option<[u8; 6]> {
    if let Ok(mac) = MacAddr6::from_str(raw) {
        return mac.as_bytes().try_into().ok();
    }

    // Bare hex form, e.g. AABBCCDDEEFF
    if raw.len() == 12 && raw.chars().all(|c| c.is_ascii_hexdigit()) {
        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = u8::from_str_radix(&raw[i * 2..i * 2 + 2], 16).ok()?;
        }
        return Some(octets);
    }

    None
}

fn format_mac(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<pnet::datalink::MacAddr> for MacAddress {
    fn from(mac: pnet::datalink::MacAddr) -> Self {
        Self::from_octets(mac.octets())
    }
}

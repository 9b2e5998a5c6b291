//! Value objects: routing keys, distances, scope tags and configuration.

use std::cmp::Ordering;
use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::entities::{Contact, Guid};
use super::errors::RoutingError;

/// Canonical identifier bit-width (SHA-1 sized id space).
pub const BIT_NODE_ID_LEN: usize = 160;

/// Canonical Kademlia bucket capacity.
pub const K: usize = 20;

/// Staleness threshold for bucket refresh, in seconds.
pub const REFRESH_INTERVAL_SECS: u64 = 3600;

/// Opaque tenant scope tag, propagated to every bucket the table creates.
///
/// The routing table never interprets it; it only keeps records of one
/// market apart from another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketId(pub u32);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Routing-table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Identifier bit-width. Must be a multiple of 8 and below 256.
    pub id_bits: usize,
    /// Bucket capacity (the Kademlia `k`).
    pub k: usize,
    /// Bucket staleness threshold for `get_refresh_list`.
    pub refresh_interval_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            id_bits: BIT_NODE_ID_LEN,
            k: K,
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
        }
    }
}

impl RoutingConfig {
    /// A config with a one-byte id space and tiny buckets, so tests can
    /// fill and split buckets with a handful of contacts.
    pub fn for_testing() -> Self {
        Self {
            id_bits: 8,
            k: 2,
            refresh_interval_secs: 1,
        }
    }

    /// Identifier width in bytes.
    pub fn id_bytes(&self) -> usize {
        self.id_bits / 8
    }

    /// One past the highest identifier value: `2^id_bits`.
    pub fn id_space_end(&self) -> U256 {
        U256::one() << self.id_bits
    }
}

/// The closed set of routing-key representations accepted by table
/// lookups.
///
/// A key designates a point in the integer identifier space. Hex text is
/// parsed as a number (with or without a `0x` prefix), raw bytes are read
/// big-endian, and a wrapped id contributes its text, parsed as hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Hex(String),
    Bytes(Vec<u8>),
    Id(Guid),
}

impl Key {
    /// Resolve this key to its point in an `id_bits`-wide identifier
    /// space.
    pub fn to_value(&self, id_bits: usize) -> Result<U256, RoutingError> {
        match self {
            Key::Hex(text) => parse_hex_value(text),
            Key::Id(guid) => parse_hex_value(guid.as_str()),
            Key::Bytes(bytes) => {
                if bytes.len() > id_bits / 8 {
                    return Err(RoutingError::InvalidKey(format!(
                        "identifier is {} bytes, id space is {} bits",
                        bytes.len(),
                        id_bits
                    )));
                }
                Ok(U256::from_big_endian(bytes))
            }
        }
    }
}

fn parse_hex_value(text: &str) -> Result<U256, RoutingError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() {
        return Err(RoutingError::InvalidKey("empty key".to_owned()));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|_| RoutingError::InvalidKey(format!("not a hexadecimal key: {text:?}")))
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::Hex(text.to_owned())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Key::Hex(text)
    }
}

impl From<Guid> for Key {
    fn from(guid: Guid) -> Self {
        Key::Id(guid)
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Key::Bytes(bytes.to_vec())
    }
}

impl From<Contact> for Key {
    fn from(contact: Contact) -> Self {
        Key::Bytes(contact.as_bytes().to_vec())
    }
}

impl From<&Contact> for Key {
    fn from(contact: &Contact) -> Self {
        Key::Bytes(contact.as_bytes().to_vec())
    }
}

/// XOR distance between two identifiers, interpreted as a big-endian
/// unsigned integer.
///
/// Comparison is numeric: leading zero bytes do not participate, so
/// distances taken over identifiers of any (equal) width order correctly.
#[derive(Clone)]
pub struct Distance(Vec<u8>);

impl Distance {
    pub(crate) fn from_xor_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Big-endian bytes with leading zeros stripped.
    fn magnitude(&self) -> &[u8] {
        let start = self
            .0
            .iter()
            .position(|byte| *byte != 0)
            .unwrap_or(self.0.len());
        &self.0[start..]
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude().is_empty()
    }

    /// Numeric value, when it fits in 128 bits.
    pub fn to_u128(&self) -> Option<u128> {
        let magnitude = self.magnitude();
        if magnitude.len() > 16 {
            return None;
        }
        let mut value = 0u128;
        for byte in magnitude {
            value = (value << 8) | u128::from(*byte);
        }
        Some(value)
    }
}

impl From<u128> for Distance {
    fn from(value: u128) -> Self {
        let bytes = value.to_be_bytes();
        let start = bytes
            .iter()
            .position(|byte| *byte != 0)
            .unwrap_or(bytes.len());
        Self(bytes[start..].to_vec())
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.magnitude() == other.magnitude()
    }
}

impl Eq for Distance {}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.magnitude();
        let b = other.magnitude();
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("0x0")
        } else {
            write!(f, "0x{}", hex::encode(self.magnitude()))
        }
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parses_hex_with_and_without_prefix() {
        assert_eq!(Key::from("ff").to_value(160).unwrap(), U256::from(255u32));
        assert_eq!(Key::from("0xff").to_value(160).unwrap(), U256::from(255u32));
        assert_eq!(Key::from("0XFF").to_value(160).unwrap(), U256::from(255u32));
    }

    #[test]
    fn test_key_rejects_malformed_text() {
        assert!(matches!(
            Key::from("z").to_value(160),
            Err(RoutingError::InvalidKey(_))
        ));
        assert!(matches!(
            Key::from("").to_value(160),
            Err(RoutingError::InvalidKey(_))
        ));
        assert!(matches!(
            Key::from("0x").to_value(160),
            Err(RoutingError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_key_reads_bytes_big_endian() {
        let key = Key::Bytes(vec![0x01, 0x00]);
        assert_eq!(key.to_value(160).unwrap(), U256::from(256u32));
    }

    #[test]
    fn test_key_rejects_oversized_byte_identifiers() {
        let key = Key::Bytes(vec![0u8; 21]);
        assert!(matches!(
            key.to_value(160),
            Err(RoutingError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_distance_ignores_leading_zeros() {
        let padded = Distance::from_xor_bytes(vec![0, 0, 0, 5]);
        let bare = Distance::from(5u128);
        assert_eq!(padded, bare);
        assert!(padded < Distance::from(6u128));
        assert!(Distance::from_xor_bytes(vec![0, 0]).is_zero());
    }

    #[test]
    fn test_distance_orders_numerically() {
        let small = Distance::from(0xffu128);
        let large = Distance::from(0x100u128);
        assert!(small < large);
        assert_eq!(large.to_u128(), Some(256));
    }

    #[test]
    fn test_config_defaults() {
        let config = RoutingConfig::default();
        assert_eq!(config.id_bits, 160);
        assert_eq!(config.k, 20);
        assert_eq!(config.id_bytes(), 20);
        assert_eq!(config.id_space_end(), U256::one() << 160);
    }
}

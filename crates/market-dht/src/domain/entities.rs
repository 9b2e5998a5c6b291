//! Entities of the routing-table core: contact identifiers and the
//! representations callers may hand us.

use std::fmt;

/// Thin wrapper around a unicode node identifier.
///
/// The surrounding node passes identifiers around either as plain strings
/// or wrapped in this type; both expose the same underlying bytes, and the
/// routing table treats them identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guid(String);

impl Guid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte content of the wrapped identifier.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of identifier representations accepted at API
/// boundaries.
///
/// Normalization to canonical bytes happens in exactly one place
/// ([`NodeRef::into_bytes`]), so equality and distance never depend on
/// which form the caller used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Raw identifier bytes.
    Bytes(Vec<u8>),
    /// Textual identifier with identical byte content.
    Text(String),
    /// Wrapped identifier.
    Id(Guid),
}

impl NodeRef {
    /// Canonical byte form of the identifier.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            NodeRef::Bytes(bytes) => bytes,
            NodeRef::Text(text) => text.into_bytes(),
            NodeRef::Id(guid) => guid.0.into_bytes(),
        }
    }
}

impl From<&[u8]> for NodeRef {
    fn from(bytes: &[u8]) -> Self {
        NodeRef::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for NodeRef {
    fn from(bytes: Vec<u8>) -> Self {
        NodeRef::Bytes(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for NodeRef {
    fn from(bytes: [u8; N]) -> Self {
        NodeRef::Bytes(bytes.to_vec())
    }
}

impl From<&str> for NodeRef {
    fn from(text: &str) -> Self {
        NodeRef::Text(text.to_owned())
    }
}

impl From<String> for NodeRef {
    fn from(text: String) -> Self {
        NodeRef::Text(text)
    }
}

impl From<Guid> for NodeRef {
    fn from(guid: Guid) -> Self {
        NodeRef::Id(guid)
    }
}

impl From<&Guid> for NodeRef {
    fn from(guid: &Guid) -> Self {
        NodeRef::Id(guid.clone())
    }
}

impl From<Contact> for NodeRef {
    fn from(contact: Contact) -> Self {
        NodeRef::Bytes(contact.0)
    }
}

impl From<&Contact> for NodeRef {
    fn from(contact: &Contact) -> Self {
        NodeRef::Bytes(contact.0.clone())
    }
}

/// Canonical contact identifier: the raw bytes of a node id.
///
/// Two contacts are equal iff their bytes are equal, independent of the
/// representation they were built from.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Contact(Vec<u8>);

impl Contact {
    pub fn new(id: impl Into<NodeRef>) -> Self {
        Self(id.into().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Contact {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Contact {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Contact {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for Contact {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for Contact {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<Guid> for Contact {
    fn from(guid: Guid) -> Self {
        Self(guid.0.into_bytes())
    }
}

impl From<&Guid> for Contact {
    fn from(guid: &Guid) -> Self {
        Self(guid.as_bytes().to_vec())
    }
}

impl From<NodeRef> for Contact {
    fn from(node: NodeRef) -> Self {
        Self(node.into_bytes())
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact({})", self)
    }
}

/// Unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Add seconds, saturating on overflow.
    pub fn add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds elapsed since `earlier`, saturating at zero.
    pub fn secs_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_equality_across_representations() {
        let from_text = Contact::from("abcd");
        let from_bytes = Contact::from(b"abcd".as_slice());
        let from_guid = Contact::from(Guid::new("abcd"));
        let from_ref = Contact::from(NodeRef::Text("abcd".into()));

        assert_eq!(from_text, from_bytes);
        assert_eq!(from_text, from_guid);
        assert_eq!(from_text, from_ref);
        assert_ne!(from_text, Contact::from("dcba"));
    }

    #[test]
    fn test_contact_displays_as_hex() {
        let contact = Contact::from(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(contact.to_string(), "deadbeef");
        assert_eq!(format!("{contact:?}"), "Contact(deadbeef)");
    }

    #[test]
    fn test_guid_exposes_underlying_bytes() {
        let guid = Guid::new("node-1");
        assert_eq!(guid.as_bytes(), b"node-1");
        assert_eq!(guid.to_string(), "node-1");
    }

    #[test]
    fn test_timestamp_arithmetic_saturates() {
        let t = Timestamp::new(100);
        assert_eq!(t.add_secs(5).as_secs(), 105);
        assert_eq!(t.secs_since(Timestamp::new(40)), 60);
        assert_eq!(Timestamp::new(40).secs_since(t), 0);
        assert_eq!(Timestamp::new(u64::MAX).add_secs(1).as_secs(), u64::MAX);
    }
}

//! Routing table: abstract contract, binary-trie implementation and
//! overflow policies.

mod bucket;
mod overflow;
mod table;

pub use bucket::KBucket;
pub use overflow::{DropContact, OverflowPolicy, ReplacementCache};
pub use table::{OptimizedTreeRoutingTable, TreeRoutingTable};


use crate::domain::services::distance;
use crate::domain::{Contact, Distance, Key, MarketId, NodeRef, RoutingError, Timestamp};

/// The contract every routing table implements.
///
/// All operations default to `RoutingError::NotImplemented`, mirroring an
/// abstract base: a concrete table overrides every operation, and a type
/// that does not is caught the first time it is exercised. Only the
/// `distance` helper comes for free.
pub trait RoutingTable {
    /// The local node's own identifier.
    fn parent_node_id(&self) -> &Contact;

    /// The opaque tenant scope this table serves.
    fn market_id(&self) -> MarketId;

    /// Record `contact` as seen at `now`.
    fn add_contact(&mut self, _contact: Contact, _now: Timestamp) -> Result<(), RoutingError> {
        Err(RoutingError::NotImplemented)
    }

    /// Up to `count` contacts closest to `key`, ascending by distance.
    /// `rpc_node_id`, when given, is never included in the result.
    fn find_close_nodes(
        &self,
        _key: &Key,
        _count: usize,
        _rpc_node_id: Option<&Contact>,
    ) -> Result<Vec<Contact>, RoutingError> {
        Err(RoutingError::NotImplemented)
    }

    /// The stored contact equal to `id`, if any. Absence is not an error.
    fn get_contact(&self, _id: &Contact) -> Result<Option<Contact>, RoutingError> {
        Err(RoutingError::NotImplemented)
    }

    /// Representative keys of buckets due for a refresh lookup, starting
    /// at `start_index`; `force` includes fresh buckets too.
    fn get_refresh_list(
        &self,
        _start_index: usize,
        _force: bool,
        _now: Timestamp,
    ) -> Result<Vec<Contact>, RoutingError> {
        Err(RoutingError::NotImplemented)
    }

    /// Forget `id`. Removing an absent contact is a no-op.
    fn remove_contact(&mut self, _id: &Contact) -> Result<(), RoutingError> {
        Err(RoutingError::NotImplemented)
    }

    /// Mark the bucket covering `key` as accessed at `timestamp`.
    fn touch_kbucket(&mut self, _key: &Key, _timestamp: Timestamp) -> Result<(), RoutingError> {
        Err(RoutingError::NotImplemented)
    }

    /// XOR distance between two identifiers in any supported
    /// representation.
    fn distance(a: impl Into<NodeRef>, b: impl Into<NodeRef>) -> Result<Distance, RoutingError>
    where
        Self: Sized,
    {
        distance(a, b)
    }
}

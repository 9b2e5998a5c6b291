//! # Market DHT Routing Table
//!
//! The routing-table core of a Kademlia-style DHT node: it tracks which
//! peers the local node knows about, organizes them by XOR distance from
//! the local identifier, and answers "which peers are closest to X"
//! queries used for lookup and message routing.
//!
//! Transport, RPC, bootstrap, persistence and the iterative lookup
//! algorithm are the host node's business; this crate owns only the
//! in-memory table and its invariants.
//!
//! ## Architecture
//!
//! - **Domain layer:** identifiers, XOR metric, k-buckets, the tree
//!   routing table and its overflow policies
//! - **Ports layer:** trait seams for host-provided facilities (time)
//! - **Adapters layer:** system-clock implementation of the time port
//!
//! ## Example
//!
//! ```rust
//! use market_dht::{Contact, MarketId, RoutingConfig, RoutingTable, Timestamp, TreeRoutingTable};
//!
//! # fn main() -> Result<(), market_dht::RoutingError> {
//! let local_id = Contact::from("0123456789abcdefghij");
//! let mut table: TreeRoutingTable =
//!     TreeRoutingTable::new(local_id, MarketId(1), RoutingConfig::default())?;
//!
//! let seen_at = Timestamp::new(1_700_000_000);
//! table.add_contact(Contact::from("abcdefghij0123456789"), seen_at)?;
//!
//! let close = table.find_close_nodes(&"deadbeef".into(), 20, None)?;
//! assert_eq!(close.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

/// Deterministic test utilities (`FixedTimeSource`).
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Domain re-exports
pub use domain::{
    closest_contacts, distance, Contact, Distance, DropContact, Guid, KBucket, Key, MarketId,
    NodeRef, OptimizedTreeRoutingTable, OverflowPolicy, ReplacementCache, RoutingConfig,
    RoutingError, RoutingTable, Timestamp, TreeRoutingTable, BIT_NODE_ID_LEN, K,
    REFRESH_INTERVAL_SECS,
};

// Port traits
pub use ports::TimeSource;

// Adapters
pub use adapters::SystemTimeSource;

#[cfg(feature = "test-utils")]
pub use testing::FixedTimeSource;

//! Domain layer: pure routing-table logic with no I/O.
//!
//! This module contains the core of the Kademlia routing table:
//! - contact identifiers and their accepted representations
//! - the XOR distance metric
//! - capacity-bounded k-buckets
//! - the binary-trie tree routing table and its overflow policies

pub mod entities;
pub mod errors;
pub mod routing_table;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use routing_table::*;
pub use services::*;
pub use value_objects::*;

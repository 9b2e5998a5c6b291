//! Domain errors for the routing-table core.

use primitive_types::U256;
use thiserror::Error;

/// Errors surfaced by routing-table operations.
///
/// Absence of a contact is never an error: `get_contact` and
/// `remove_contact` report it as an empty result. `BucketNotFound` and
/// `MultipleBuckets` mean the identifier-space partition is broken and
/// must not be masked by callers; `BucketFull` is recoverable and is
/// consumed by the table's own overflow handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The abstract contract was called without a concrete override.
    #[error("routing table operation not implemented")]
    NotImplemented,

    /// Two identifiers of different byte lengths have no defined distance.
    #[error("identifier length mismatch: {left} bytes vs {right} bytes")]
    IdLengthMismatch { left: usize, right: usize },

    /// A key argument could not be parsed into the identifier space.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// No bucket covers the key.
    #[error("no bucket covers key {key:#x}")]
    BucketNotFound { key: U256 },

    /// More than one bucket covers the key.
    #[error("{matches} buckets cover key {key:#x}")]
    MultipleBuckets { key: U256, matches: usize },

    /// A bucket insert hit the capacity bound `k`.
    #[error("bucket at capacity ({capacity} contacts)")]
    BucketFull { capacity: usize },
}

//! Kademlia XOR metric.

use crate::domain::{Distance, NodeRef, RoutingError};

/// XOR distance between two identifiers.
///
/// Accepts any supported identifier representation; both arguments are
/// normalized to raw bytes before the metric is computed, so the result
/// never depends on representation. Identifiers of unequal byte length
/// have no defined distance.
pub fn distance(a: impl Into<NodeRef>, b: impl Into<NodeRef>) -> Result<Distance, RoutingError> {
    let a = a.into().into_bytes();
    let b = b.into().into_bytes();
    if a.len() != b.len() {
        return Err(RoutingError::IdLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let xor = a.iter().zip(&b).map(|(x, y)| x ^ y).collect();
    Ok(Distance::from_xor_bytes(xor))
}

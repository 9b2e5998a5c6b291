//! Outbound ports: trait seams the routing-table core expects its host
//! to provide.

use crate::domain::Timestamp;

/// Wall-clock source for "now" arguments.
///
/// Production code uses the system clock adapter; tests inject a fixed
/// source so bucket staleness and recency are deterministic.
pub trait TimeSource: Send + Sync {
    /// Current timestamp.
    fn now(&self) -> Timestamp;
}

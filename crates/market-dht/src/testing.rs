//! Deterministic test utilities.
//!
//! Available to downstream crates with the `test-utils` feature.

use crate::domain::Timestamp;
use crate::ports::TimeSource;

/// A time source that always returns the same timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    secs: u64,
}

impl FixedTimeSource {
    pub fn new(secs: u64) -> Self {
        Self { secs }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.secs)
    }
}

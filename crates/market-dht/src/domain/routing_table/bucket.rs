//! K-bucket: bounded, recency-ordered contacts for one id-space range.

use primitive_types::U256;

use crate::domain::{Contact, MarketId, RoutingError, Timestamp};

/// A contiguous half-open slice `[range_min, range_max)` of the
/// identifier space and the contacts currently known inside it.
///
/// Contacts are kept in recency order: the most recently seen contact
/// sits at the tail. The bucket only enforces the capacity bound; what to
/// do with a contact that does not fit is the owning table's decision.
#[derive(Debug, Clone)]
pub struct KBucket {
    pub(crate) range_min: U256,
    pub(crate) range_max: U256,
    pub(crate) contacts: Vec<Contact>,
    pub(crate) last_accessed: Timestamp,
    market_id: MarketId,
    capacity: usize,
}

impl KBucket {
    pub fn new(range_min: U256, range_max: U256, market_id: MarketId, capacity: usize) -> Self {
        debug_assert!(range_min < range_max);
        Self {
            range_min,
            range_max,
            contacts: Vec::new(),
            last_accessed: Timestamp::new(0),
            market_id,
            capacity,
        }
    }

    pub fn range_min(&self) -> U256 {
        self.range_min
    }

    pub fn range_max(&self) -> U256 {
        self.range_max
    }

    pub fn market_id(&self) -> MarketId {
        self.market_id
    }

    pub fn last_accessed(&self) -> Timestamp {
        self.last_accessed
    }

    /// Contacts in recency order, most recently seen last.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.contacts.len() >= self.capacity
    }

    /// Half-open range membership test.
    pub fn covers(&self, value: U256) -> bool {
        self.range_min <= value && value < self.range_max
    }

    pub fn contains(&self, id: &Contact) -> bool {
        self.contacts.iter().any(|contact| contact == id)
    }

    /// Append `id` as most recently seen.
    ///
    /// A contact already present is moved to the tail instead of
    /// duplicated; a full bucket reports `BucketFull` and leaves the
    /// decision to the caller.
    pub fn add_contact(&mut self, id: Contact) -> Result<(), RoutingError> {
        if let Some(pos) = self.contacts.iter().position(|contact| contact == &id) {
            let existing = self.contacts.remove(pos);
            self.contacts.push(existing);
            return Ok(());
        }
        if self.contacts.len() >= self.capacity {
            return Err(RoutingError::BucketFull {
                capacity: self.capacity,
            });
        }
        self.contacts.push(id);
        Ok(())
    }

    /// Remove `id` if present, reporting whether anything changed.
    /// Absence is not an error.
    pub fn remove_contact(&mut self, id: &Contact) -> bool {
        match self.contacts.iter().position(|contact| contact == id) {
            Some(pos) => {
                self.contacts.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Mark the bucket as accessed at `timestamp`.
    pub fn touch(&mut self, timestamp: Timestamp) {
        self.last_accessed = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(capacity: usize) -> KBucket {
        KBucket::new(U256::zero(), U256::from(256u32), MarketId(42), capacity)
    }

    #[test]
    fn test_bucket_enforces_capacity() {
        let mut bucket = bucket(2);
        bucket.add_contact(Contact::from(vec![1u8])).unwrap();
        bucket.add_contact(Contact::from(vec![2u8])).unwrap();

        assert!(bucket.is_full());
        assert_eq!(
            bucket.add_contact(Contact::from(vec![3u8])),
            Err(RoutingError::BucketFull { capacity: 2 })
        );
        assert_eq!(bucket.len(), 2);
    }

    #[test]
    fn test_readding_moves_contact_to_tail() {
        let mut bucket = bucket(2);
        bucket.add_contact(Contact::from(vec![1u8])).unwrap();
        bucket.add_contact(Contact::from(vec![2u8])).unwrap();

        // Full, but a known contact is refreshed rather than rejected.
        bucket.add_contact(Contact::from(vec![1u8])).unwrap();
        assert_eq!(
            bucket.contacts(),
            &[Contact::from(vec![2u8]), Contact::from(vec![1u8])]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut bucket = bucket(2);
        bucket.add_contact(Contact::from(vec![1u8])).unwrap();

        assert!(bucket.remove_contact(&Contact::from(vec![1u8])));
        assert!(!bucket.remove_contact(&Contact::from(vec![1u8])));
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_covers_is_half_open() {
        let bucket = bucket(2);
        assert!(bucket.covers(U256::zero()));
        assert!(bucket.covers(U256::from(255u32)));
        assert!(!bucket.covers(U256::from(256u32)));
    }

    #[test]
    fn test_touch_updates_last_accessed() {
        let mut bucket = bucket(2);
        assert_eq!(bucket.last_accessed(), Timestamp::new(0));

        bucket.touch(Timestamp::new(7));
        assert_eq!(bucket.last_accessed(), Timestamp::new(7));
    }
}

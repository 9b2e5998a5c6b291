//! Overflow policies: what becomes of a contact rejected by a full,
//! non-splittable bucket.

use std::collections::{HashMap, VecDeque};

use primitive_types::U256;
use tracing::debug;

use crate::domain::Contact;

/// Decides the fate of contacts rejected by a full bucket that is not
/// allowed to split.
///
/// The table delegates only the overflow decision; bucket membership and
/// splitting stay with the table. Buckets are keyed by their `range_min`,
/// which is stable for any bucket that can overflow: only buckets covering
/// the local node's id split, and those are never left full.
pub trait OverflowPolicy: Default {
    /// A full bucket rejected `contact`. `capacity` is the bucket bound
    /// `k`.
    fn on_bucket_full(&mut self, bucket_key: U256, contact: Contact, capacity: usize);

    /// A slot opened up in the bucket; return a candidate to promote into
    /// it, if any.
    fn take_replacement(&mut self, bucket_key: U256) -> Option<Contact>;

    /// `id` left the table for good; drop any cached candidacy it held.
    fn forget(&mut self, bucket_key: U256, id: &Contact);
}

/// Base policy: the newcomer is dropped, as in classic Kademlia when the
/// residents of a full bucket are presumed alive.
#[derive(Debug, Default, Clone)]
pub struct DropContact;

impl OverflowPolicy for DropContact {
    fn on_bucket_full(&mut self, bucket_key: U256, contact: Contact, _capacity: usize) {
        debug!(%contact, bucket = %bucket_key, "bucket full, dropping contact");
    }

    fn take_replacement(&mut self, _bucket_key: U256) -> Option<Contact> {
        None
    }

    fn forget(&mut self, _bucket_key: U256, _id: &Contact) {}
}

/// Replacement cache: rejected contacts are retained per bucket and
/// promoted when a resident is later removed.
///
/// Each queue is bounded like a bucket. When full, the oldest candidate
/// is discarded; a re-cached contact moves to the back; promotion takes
/// the back, so the most recently seen candidate wins.
#[derive(Debug, Default, Clone)]
pub struct ReplacementCache {
    slots: HashMap<U256, VecDeque<Contact>>,
}

impl ReplacementCache {
    /// Number of candidates cached for the bucket keyed by `bucket_key`.
    pub fn len(&self, bucket_key: U256) -> usize {
        self.slots.get(&bucket_key).map_or(0, VecDeque::len)
    }

    /// True when no bucket has cached candidates.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, bucket_key: U256, id: &Contact) -> bool {
        self.slots
            .get(&bucket_key)
            .is_some_and(|queue| queue.iter().any(|contact| contact == id))
    }
}

impl OverflowPolicy for ReplacementCache {
    fn on_bucket_full(&mut self, bucket_key: U256, contact: Contact, capacity: usize) {
        let queue = self.slots.entry(bucket_key).or_default();
        if let Some(pos) = queue.iter().position(|cached| cached == &contact) {
            queue.remove(pos);
        } else if queue.len() >= capacity {
            // The oldest candidate gives way.
            queue.pop_front();
        }
        debug!(%contact, bucket = %bucket_key, "bucket full, caching replacement candidate");
        queue.push_back(contact);
    }

    fn take_replacement(&mut self, bucket_key: U256) -> Option<Contact> {
        let queue = self.slots.get_mut(&bucket_key)?;
        let contact = queue.pop_back();
        if queue.is_empty() {
            self.slots.remove(&bucket_key);
        }
        contact
    }

    fn forget(&mut self, bucket_key: U256, id: &Contact) {
        if let Some(queue) = self.slots.get_mut(&bucket_key) {
            queue.retain(|contact| contact != id);
            if queue.is_empty() {
                self.slots.remove(&bucket_key);
            }
        }
    }
}

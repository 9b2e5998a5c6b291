//! Binary-trie routing table over the identifier space.

use primitive_types::U256;
use tracing::{debug, warn};

use crate::domain::services::closest_contacts;
use crate::domain::{Contact, Key, MarketId, RoutingConfig, RoutingError, Timestamp};

use super::bucket::KBucket;
use super::overflow::{DropContact, OverflowPolicy, ReplacementCache};
use super::RoutingTable;

/// Routing table that partitions the identifier space into a binary trie
/// of k-buckets.
///
/// The table starts with a single bucket spanning the whole space and
/// splits a bucket only when it is full and covers the local node's own
/// identifier, per classic Kademlia. At any point the bucket list
/// partitions `[0, 2^id_bits)`: ranges are pairwise disjoint, sorted by
/// `range_min` and cover the space exactly.
///
/// The overflow policy `P` decides what happens to contacts rejected by a
/// full bucket that may not split: [`DropContact`] discards them,
/// [`ReplacementCache`] retains them as eviction replacements.
#[derive(Debug)]
pub struct TreeRoutingTable<P: OverflowPolicy = DropContact> {
    parent_node_id: Contact,
    parent_value: U256,
    market_id: MarketId,
    config: RoutingConfig,
    pub(crate) buckets: Vec<KBucket>,
    overflow: P,
}

/// Tree routing table with a per-bucket replacement cache for contacts
/// rejected by full, non-splittable buckets.
pub type OptimizedTreeRoutingTable = TreeRoutingTable<ReplacementCache>;

impl<P: OverflowPolicy> TreeRoutingTable<P> {
    /// Create a table owning one bucket that spans the whole identifier
    /// space.
    ///
    /// Fails when the parent identifier's byte length does not match the
    /// configured identifier width.
    pub fn new(
        parent_node_id: impl Into<Contact>,
        market_id: MarketId,
        config: RoutingConfig,
    ) -> Result<Self, RoutingError> {
        let parent_node_id = parent_node_id.into();
        if parent_node_id.len() != config.id_bytes() {
            return Err(RoutingError::InvalidKey(format!(
                "parent node id is {} bytes, id space is {} bits",
                parent_node_id.len(),
                config.id_bits
            )));
        }
        let parent_value = Key::from(&parent_node_id).to_value(config.id_bits)?;
        let root = KBucket::new(U256::zero(), config.id_space_end(), market_id, config.k);

        Ok(Self {
            parent_node_id,
            parent_value,
            market_id,
            config,
            buckets: vec![root],
            overflow: P::default(),
        })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Buckets in range order.
    pub fn buckets(&self) -> &[KBucket] {
        &self.buckets
    }

    pub fn overflow_policy(&self) -> &P {
        &self.overflow
    }

    /// Index of the unique bucket whose range covers `key`.
    ///
    /// Zero matches or more than one mean the partition invariant is
    /// broken; both are reported as errors and never masked.
    pub fn kbucket_index(&self, key: &Key) -> Result<usize, RoutingError> {
        let value = key.to_value(self.config.id_bits)?;
        self.index_of_value(value)
    }

    fn index_of_value(&self, value: U256) -> Result<usize, RoutingError> {
        let mut matches = self
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| bucket.covers(value));

        let Some((index, _)) = matches.next() else {
            warn!(key = %value, "no bucket covers key; partition invariant broken");
            return Err(RoutingError::BucketNotFound { key: value });
        };
        let extra = matches.count();
        if extra > 0 {
            warn!(
                key = %value,
                matches = extra + 1,
                "multiple buckets cover key; partition invariant broken"
            );
            return Err(RoutingError::MultipleBuckets {
                key: value,
                matches: extra + 1,
            });
        }
        Ok(index)
    }

    fn value_of(&self, contact: &Contact) -> Result<U256, RoutingError> {
        // A contact narrower than the id width would alias another id's
        // integer value; identities must be exactly id_bits wide.
        if contact.len() != self.config.id_bytes() {
            return Err(RoutingError::InvalidKey(format!(
                "identifier is {} bytes, id space is {} bits",
                contact.len(),
                self.config.id_bits
            )));
        }
        Key::from(contact).to_value(self.config.id_bits)
    }

    /// Replace the bucket at `index` with two children covering its lower
    /// and upper halves, redistributing its contacts by range membership.
    fn split_bucket(&mut self, index: usize) {
        let bucket = self.buckets.remove(index);
        let mid = bucket.range_min() + ((bucket.range_max() - bucket.range_min()) >> 1);

        let mut lower = KBucket::new(bucket.range_min(), mid, self.market_id, self.config.k);
        let mut upper = KBucket::new(mid, bucket.range_max(), self.market_id, self.config.k);
        lower.last_accessed = bucket.last_accessed;
        upper.last_accessed = bucket.last_accessed;

        for contact in bucket.contacts {
            match self.value_of(&contact) {
                Ok(value) if value >= mid => upper.contacts.push(contact),
                Ok(_) => lower.contacts.push(contact),
                Err(err) => {
                    warn!(%contact, %err, "dropping unresolvable contact during split")
                }
            }
        }

        debug!(
            range_min = %lower.range_min(),
            mid = %mid,
            range_max = %upper.range_max(),
            "split bucket"
        );
        self.buckets.insert(index, upper);
        self.buckets.insert(index, lower);
    }

    fn collect_candidates(
        &self,
        index: usize,
        exclude: Option<&Contact>,
        out: &mut Vec<(U256, Contact)>,
    ) {
        for contact in self.buckets[index].contacts() {
            if exclude == Some(contact) {
                continue;
            }
            // Stored contacts resolved successfully on entry.
            if let Ok(value) = self.value_of(contact) {
                out.push((value, contact.clone()));
            }
        }
    }

    /// A key inside the bucket's range, used to aim a refresh lookup.
    fn representative_contact(&self, bucket: &KBucket) -> Contact {
        let value = bucket.range_max() - U256::one();
        let mut buf = [0u8; 32];
        value.to_big_endian(&mut buf);
        Contact::from(&buf[32 - self.config.id_bytes()..])
    }
}

impl<P: OverflowPolicy> RoutingTable for TreeRoutingTable<P> {
    fn parent_node_id(&self) -> &Contact {
        &self.parent_node_id
    }

    fn market_id(&self) -> MarketId {
        self.market_id
    }

    fn add_contact(&mut self, contact: Contact, now: Timestamp) -> Result<(), RoutingError> {
        if contact == self.parent_node_id {
            debug!(%contact, "ignoring attempt to add the local node to its own table");
            return Ok(());
        }
        let value = self.value_of(&contact)?;

        loop {
            let index = self.index_of_value(value)?;
            match self.buckets[index].add_contact(contact.clone()) {
                Ok(()) => {
                    self.buckets[index].touch(now);
                    return Ok(());
                }
                Err(RoutingError::BucketFull { capacity }) => {
                    let width =
                        self.buckets[index].range_max() - self.buckets[index].range_min();
                    // Only our own neighbourhood subdivides, and never
                    // below a unit-width range.
                    if self.buckets[index].covers(self.parent_value) && width > U256::one() {
                        self.split_bucket(index);
                        continue;
                    }
                    let bucket_key = self.buckets[index].range_min();
                    self.overflow.on_bucket_full(bucket_key, contact, capacity);
                    return Ok(());
                }
                Err(other) => return Err(other),
            }
        }
    }

    fn find_close_nodes(
        &self,
        key: &Key,
        count: usize,
        rpc_node_id: Option<&Contact>,
    ) -> Result<Vec<Contact>, RoutingError> {
        let target = key.to_value(self.config.id_bits)?;
        let center = self.index_of_value(target)?;

        let mut candidates: Vec<(U256, Contact)> = Vec::new();
        self.collect_candidates(center, rpc_node_id, &mut candidates);

        // Widen over adjacent ranges until enough candidates are gathered
        // or the table is exhausted.
        let mut offset = 1;
        while candidates.len() < count
            && (offset <= center || center + offset < self.buckets.len())
        {
            if offset <= center {
                self.collect_candidates(center - offset, rpc_node_id, &mut candidates);
            }
            if center + offset < self.buckets.len() {
                self.collect_candidates(center + offset, rpc_node_id, &mut candidates);
            }
            offset += 1;
        }

        Ok(closest_contacts(candidates, target, count))
    }

    fn get_contact(&self, id: &Contact) -> Result<Option<Contact>, RoutingError> {
        let value = self.value_of(id)?;
        let index = self.index_of_value(value)?;
        Ok(self.buckets[index]
            .contacts()
            .iter()
            .find(|contact| *contact == id)
            .cloned())
    }

    fn get_refresh_list(
        &self,
        start_index: usize,
        force: bool,
        now: Timestamp,
    ) -> Result<Vec<Contact>, RoutingError> {
        let stale_after = self.config.refresh_interval_secs;
        Ok(self
            .buckets
            .iter()
            .skip(start_index)
            .filter(|bucket| force || now.secs_since(bucket.last_accessed()) >= stale_after)
            .map(|bucket| self.representative_contact(bucket))
            .collect())
    }

    fn remove_contact(&mut self, id: &Contact) -> Result<(), RoutingError> {
        let value = self.value_of(id)?;
        let index = self.index_of_value(value)?;
        let bucket_key = self.buckets[index].range_min();

        let removed = self.buckets[index].remove_contact(id);
        self.overflow.forget(bucket_key, id);
        if !removed {
            return Ok(());
        }

        debug!(contact = %id, "removed contact");
        if let Some(candidate) = self.overflow.take_replacement(bucket_key) {
            // The freed slot goes to the most recently cached candidate.
            // Promotion recycles a contact seen earlier, not fresh
            // traffic, so the bucket's last_accessed stays put.
            match self.buckets[index].add_contact(candidate.clone()) {
                Ok(()) => debug!(%candidate, "promoted cached replacement into bucket"),
                Err(err) => warn!(%candidate, %err, "failed to promote cached replacement"),
            }
        }
        Ok(())
    }

    fn touch_kbucket(&mut self, key: &Key, timestamp: Timestamp) -> Result<(), RoutingError> {
        let index = self.kbucket_index(key)?;
        self.buckets[index].touch(timestamp);
        Ok(())
    }
}

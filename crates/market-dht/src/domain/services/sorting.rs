//! Contact ranking for nearest-neighbour queries.

use primitive_types::U256;

use crate::domain::Contact;

/// Rank `candidates` by ascending XOR distance from `target` and keep the
/// closest `count`.
///
/// Candidates carry their already-resolved point in the identifier space,
/// so the metric reduces to integer XOR. The sort is stable: equally
/// distant contacts keep their discovery order.
pub fn closest_contacts(
    mut candidates: Vec<(U256, Contact)>,
    target: U256,
    count: usize,
) -> Vec<Contact> {
    candidates.sort_by_key(|(value, _)| *value ^ target);
    candidates
        .into_iter()
        .take(count)
        .map(|(_, contact)| contact)
        .collect()
}

//! Domain services: pure functions over identifiers and contacts.

mod distance;
mod sorting;

pub use distance::distance;
pub use sorting::closest_contacts;

#[cfg(test)]
mod tests;

//! Adapters: concrete implementations of the outbound ports.

mod time;

pub use time::SystemTimeSource;

//! Pizarra Core - Domain types for the query cache
//!
//! This crate provides the foundational types shared by the Pizarra
//! query cache: cache entries, the key naming convention, the time
//! source abstraction and the error type.

pub mod clock;
pub mod entry;
pub mod error;
pub mod key;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use error::{PizarraError, Result};
pub use key::QueryKey;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

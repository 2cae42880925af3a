//! Pizarra Cache - In-process query cache for the dashboard API layer
//!
//! API-calling code writes results under a key after a successful fetch,
//! reads them back before issuing a new one, and invalidates entries
//! (by exact key or by substring pattern) after mutations. Staleness is a
//! hint for the caller: the cache never performs I/O and never refetches.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use pizarra_cache::QueryCache;
//! use pizarra_core::ManualClock;
//! use serde_json::json;
//!
//! let clock = ManualClock::new();
//! let cache: QueryCache = QueryCache::with_clock(Duration::from_secs(300), Arc::new(clock.clone()));
//!
//! cache.set("students-42", json!({"id": 42, "name": "Ada"}));
//! assert!(!cache.get("students-42").unwrap().is_stale());
//!
//! clock.advance(Duration::from_secs(301));
//! let entry = cache.get("students-42").unwrap();
//! assert!(entry.is_stale());
//! assert_eq!(entry.value()["name"], "Ada");
//! ```

pub mod cache;
pub mod metrics;
pub mod settings;

pub use crate::cache::{DEFAULT_STALE_TIME, InvalidationResult, QueryCache};
pub use crate::metrics::{CacheMetrics, register_cache_metrics};
pub use crate::settings::CacheSettings;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_defined() {
        assert!(!version().is_empty());
    }
}

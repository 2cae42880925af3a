//! Cache module for the Pizarra query cache.
//!
//! This module provides the in-process query cache, with lazy
//! time-based staleness, substring pattern invalidation, and metrics.

pub mod invalidation;
pub mod query_cache;

// Re-exports
pub use invalidation::InvalidationResult;
pub use query_cache::{DEFAULT_STALE_TIME, QueryCache};

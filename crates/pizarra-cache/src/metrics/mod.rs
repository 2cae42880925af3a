//! Metrics module for the Pizarra query cache.

pub mod cache;

pub use cache::{CacheMetrics, register_cache_metrics};

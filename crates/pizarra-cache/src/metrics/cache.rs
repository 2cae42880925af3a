//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las descripciones de las metricas de cache.
/// Llamar una vez al inicio, despues de instalar el recorder.
pub fn register_cache_metrics() {
    metrics::describe_counter!("pizarra_cache_hits_total", "Total number of fresh cache hits");
    metrics::describe_counter!(
        "pizarra_cache_stale_hits_total",
        "Total number of reads that returned a stale entry"
    );
    metrics::describe_counter!("pizarra_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "pizarra_cache_invalidations_total",
        "Total number of entries marked stale by invalidation"
    );
    metrics::describe_gauge!("pizarra_cache_entries", "Current number of entries in cache");
    metrics::describe_histogram!(
        "pizarra_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
///
/// Mantiene contadores atomicos locales (consultables desde el codigo) y,
/// si `export` esta activo, los replica en el facade de `metrics`.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    stale_hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    invalidations: Arc<AtomicU64>,
    export: bool,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::with_export(true)
    }

    /// Solo contadores locales, sin emitir al facade de `metrics`.
    pub fn local_only() -> Self {
        Self::with_export(false)
    }

    fn with_export(export: bool) -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            stale_hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            invalidations: Arc::new(AtomicU64::new(0)),
            export,
        }
    }

    /// Registra un hit sobre una entry fresca
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        if self.export {
            counter!("pizarra_cache_hits_total").increment(1);
        }
    }

    /// Registra un hit sobre una entry stale
    pub fn record_stale_hit(&self) {
        self.stale_hits.fetch_add(1, Ordering::Relaxed);
        if self.export {
            counter!("pizarra_cache_stale_hits_total").increment(1);
        }
    }

    /// Registra un cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        if self.export {
            counter!("pizarra_cache_misses_total").increment(1);
        }
    }

    /// Registra entries marcadas como stale por invalidacion explicita
    pub fn record_invalidations(&self, count: u64) {
        if count == 0 {
            return;
        }
        self.invalidations.fetch_add(count, Ordering::Relaxed);
        if self.export {
            counter!("pizarra_cache_invalidations_total").increment(count);
        }
    }

    /// Actualiza el gauge de entries
    pub fn update_entry_count(&self, count: u64) {
        if self.export {
            gauge!("pizarra_cache_entries").set(count as f64);
        }
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &str, duration: Duration) {
        if self.export {
            histogram!(
                "pizarra_cache_operation_seconds",
                "operation" => operation.to_string()
            )
            .record(duration.as_secs_f64());
        }
    }

    /// Calcula hit rate; los stale hits cuentan como hits.
    pub fn hit_rate(&self) -> f64 {
        let hits = (self.hits() + self.stale_hits()) as f64;
        let misses = self.misses() as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn stale_hits(&self) -> u64 {
        self.stale_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

//! Test helpers para pizarra-cache.

#![allow(dead_code, unused_imports)]

use std::sync::{Arc, Once};
use std::time::Duration;

use pizarra_cache::{DEFAULT_STALE_TIME, QueryCache};
use pizarra_core::ManualClock;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static TRACING: Once = Once::new();

/// Inicializa tracing una sola vez por binario de test.
/// Usar `RUST_LOG=pizarra_cache=debug` para ver los eventos del cache.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Cache con reloj manual y el stale time por defecto.
pub fn manual_cache<V>() -> (QueryCache<V>, ManualClock) {
    manual_cache_with(DEFAULT_STALE_TIME)
}

/// Cache con reloj manual y un stale time especifico.
pub fn manual_cache_with<V>(stale_time: Duration) -> (QueryCache<V>, ManualClock) {
    init_tracing();
    let clock = ManualClock::new();
    let cache = QueryCache::with_clock(stale_time, Arc::new(clock.clone()));
    (cache, clock)
}

//! Cached value plus freshness metadata.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Una entry del cache: el valor guardado y su metadata de frescura.
///
/// El valor se guarda detras de un `Arc`, por lo que el cache retiene la
/// misma allocation que recibio. Si el tipo `V` tiene mutabilidad interior,
/// los cambios que haga el caller despues de `set` se ven a traves del cache.
pub struct CacheEntry<V> {
    key: String,
    value: Arc<V>,
    stored_at: Instant,
    stale: bool,
}

impl<V> CacheEntry<V> {
    /// Crea una entry fresca escrita en `stored_at`.
    pub fn new(key: impl Into<String>, value: Arc<V>, stored_at: Instant) -> Self {
        Self {
            key: key.into(),
            value,
            stored_at,
            stale: false,
        }
    }

    /// Retorna la key de la entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Retorna el valor guardado.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Retorna el handle compartido al valor guardado.
    pub fn shared_value(&self) -> Arc<V> {
        Arc::clone(&self.value)
    }

    /// Instante en que la entry fue escrita.
    pub fn stored_at(&self) -> Instant {
        self.stored_at
    }

    /// Indica si la entry fue marcada como stale.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Edad de la entry respecto de `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    /// Marca la entry como stale. Retorna `true` si el flag cambio.
    ///
    /// Value y `stored_at` no se tocan; solo una nueva escritura limpia el flag.
    pub fn mark_stale(&mut self) -> bool {
        let changed = !self.stale;
        self.stale = true;
        changed
    }
}

// Manual impls: cloning an entry clones the `Arc`, never `V`.
impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: Arc::clone(&self.value),
            stored_at: self.stored_at,
            stale: self.stale,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("stored_at", &self.stored_at)
            .field("stale", &self.stale)
            .finish()
    }
}

//! Query cache with lazy time-based staleness.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use pizarra_core::{CacheEntry, Clock, SystemClock};
use serde_json::Value;
use tracing::{debug, info};

use crate::metrics::CacheMetrics;
use crate::settings::{CacheSettings, DEFAULT_STALE_TIME_SECONDS};

/// Stale time por defecto (5 minutos).
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(DEFAULT_STALE_TIME_SECONDS);

/// Cache de resultados de queries, en memoria y local al proceso.
///
/// Cada entry guarda el valor, el instante de escritura y un flag `stale`.
/// La frescura se evalua al leer: no hay timers ni limpieza en segundo
/// plano, y la edad nunca elimina una entry, solo la marca como stale.
///
/// Los clones comparten el mismo store. La instancia se construye en la
/// raiz de composicion y se pasa por handle a quien la necesite.
///
/// # Examples
///
/// ```
/// use pizarra_cache::QueryCache;
/// use serde_json::json;
///
/// let cache: QueryCache = QueryCache::default();
/// cache.set("students-list", json!([{"id": 1}]));
///
/// let entry = cache.get("students-list").unwrap();
/// assert_eq!(entry.value(), &json!([{"id": 1}]));
/// assert!(!entry.is_stale());
///
/// cache.invalidate("students-list");
/// assert!(cache.get("students-list").unwrap().is_stale());
/// ```
pub struct QueryCache<V = Value> {
    pub(super) store: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    stale_time: Duration,
    clock: Arc<dyn Clock>,
    pub(super) metrics: CacheMetrics,
}

impl<V> QueryCache<V> {
    /// Crea un cache con el stale time dado, usando el reloj del sistema.
    pub fn new(stale_time: Duration) -> Self {
        Self::with_clock(stale_time, Arc::new(SystemClock))
    }

    /// Crea un cache con un reloj especifico (tests, simulaciones).
    pub fn with_clock(stale_time: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::build(stale_time, clock, CacheMetrics::new())
    }

    /// Crea un cache a partir de la configuracion cargada.
    pub fn with_settings(settings: &CacheSettings) -> Self {
        let metrics = if settings.metrics_enabled {
            CacheMetrics::new()
        } else {
            CacheMetrics::local_only()
        };
        Self::build(settings.stale_time(), Arc::new(SystemClock), metrics)
    }

    fn build(stale_time: Duration, clock: Arc<dyn Clock>, metrics: CacheMetrics) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            stale_time,
            clock,
            metrics,
        }
    }

    /// Guarda `value` bajo `key`, reemplazando cualquier entry previa.
    ///
    /// La entry queda fresca (`stale == false`) con `stored_at` = ahora.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_shared(key, Arc::new(value));
    }

    /// Igual que [`set`](Self::set), pero con un valor ya compartido.
    ///
    /// El cache retiene el mismo `Arc`; no hace copia defensiva.
    pub fn set_shared(&self, key: impl Into<String>, value: Arc<V>) {
        let key = key.into();

        let count = {
            let mut store = self.store.write();
            // Timestamp tomado bajo el lock: la ultima escritura gana
            let entry = CacheEntry::new(key.clone(), value, self.clock.now());
            store.insert(key.clone(), entry);
            store.len()
        };

        debug!(key = %key, "Cache entry stored");
        self.metrics.update_entry_count(count as u64);
    }

    /// Obtiene la entry para `key`, o `None` si no existe.
    ///
    /// No es una lectura pura: si la entry tiene mas de `stale_time` de
    /// edad, el flag `stale` queda persistido en el store antes de
    /// retornarla. La lectura nunca limpia el flag ni elimina la entry.
    pub fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        let start = Instant::now();
        let now = self.clock.now();

        let result = {
            let store = self.store.upgradable_read();
            let expired = match store.get(key) {
                Some(entry) => !entry.is_stale() && entry.age(now) > self.stale_time,
                None => false,
            };

            if expired {
                let mut store = RwLockUpgradableReadGuard::upgrade(store);
                store.get_mut(key).map(|entry| {
                    entry.mark_stale();
                    debug!(key = %key, "Cache entry became stale by age");
                    entry.clone()
                })
            } else {
                store.get(key).cloned()
            }
        };

        match &result {
            Some(entry) if entry.is_stale() => self.metrics.record_stale_hit(),
            Some(_) => self.metrics.record_hit(),
            None => self.metrics.record_miss(),
        }
        self.metrics
            .record_operation_duration("get", start.elapsed());

        result
    }

    /// Retorna la entry tal como esta guardada, sin evaluar la edad.
    ///
    /// No modifica el store ni registra hits/misses.
    pub fn peek(&self, key: &str) -> Option<CacheEntry<V>> {
        self.store.read().get(key).cloned()
    }

    /// Marca la entry como stale sin eliminarla.
    ///
    /// Value y `stored_at` no cambian. Retorna `false` (sin error) si la
    /// key no existe.
    pub fn invalidate(&self, key: &str) -> bool {
        let found = match self.store.write().get_mut(key) {
            Some(entry) => {
                entry.mark_stale();
                true
            },
            None => false,
        };

        if found {
            self.metrics.record_invalidations(1);
            debug!(key = %key, "Cache entry invalidated");
        }
        found
    }

    /// Elimina la entry. Retorna `false` (sin error) si la key no existe.
    pub fn remove(&self, key: &str) -> bool {
        let (removed, count) = {
            let mut store = self.store.write();
            let removed = store.remove(key).is_some();
            (removed, store.len())
        };

        if removed {
            debug!(key = %key, "Cache entry removed");
            self.metrics.update_entry_count(count as u64);
        }
        removed
    }

    /// Elimina todas las entries.
    pub fn clear(&self) {
        let count = {
            let mut store = self.store.write();
            let count = store.len();
            store.clear();
            count
        };

        info!(count = count, "Cache cleared");
        self.metrics.update_entry_count(0);
    }

    /// Indica si existe una entry para `key`, sin efectos secundarios.
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.read().contains_key(key)
    }

    /// Numero de entries en el store.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Indica si el store esta vacio.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Snapshot de las keys presentes, en orden arbitrario.
    pub fn keys(&self) -> Vec<String> {
        self.store.read().keys().cloned().collect()
    }

    /// Stale time compartido por todas las entries.
    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            stale_time: self.stale_time,
            clock: Arc::clone(&self.clock),
            metrics: self.metrics.clone(),
        }
    }
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl<V> fmt::Debug for QueryCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .field("stale_time", &self.stale_time)
            .field("clock", &self.clock)
            .finish()
    }
}

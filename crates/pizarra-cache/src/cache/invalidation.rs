//! Pattern invalidation over cache keys.

use pizarra_core::QueryKey;
use tracing::info;

use crate::cache::QueryCache;

/// Resultado de una operacion de invalidacion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationResult {
    /// Numero de entries que coincidieron (incluye las que ya estaban stale).
    pub count: usize,
    /// Patrones aplicados.
    pub patterns: Vec<String>,
}

impl<V> QueryCache<V> {
    /// Marca como stale toda entry cuya key contenga `pattern`.
    ///
    /// El patron es un substring literal, no un glob ni una regex:
    /// `"students"` coincide con `"students-list"`, `"students-42"` y
    /// tambien con `"alumni-students-archive"`. Un patron vacio coincide
    /// con todas las keys. Solo afecta las keys presentes al momento de la
    /// llamada; las entries no se eliminan.
    ///
    /// # Examples
    ///
    /// ```
    /// use pizarra_cache::QueryCache;
    /// use serde_json::json;
    ///
    /// let cache: QueryCache = QueryCache::default();
    /// cache.set("students-list", json!([]));
    /// cache.set("students-1", json!({}));
    /// cache.set("courses-list", json!([]));
    ///
    /// let result = cache.invalidate_many("students");
    /// assert_eq!(result.count, 2);
    /// assert!(!cache.get("courses-list").unwrap().is_stale());
    /// ```
    pub fn invalidate_many(&self, pattern: &str) -> InvalidationResult {
        let count = {
            let mut store = self.store.write();
            let mut count = 0;
            for (key, entry) in store.iter_mut() {
                if key.contains(pattern) {
                    entry.mark_stale();
                    count += 1;
                }
            }
            count
        };

        self.metrics.record_invalidations(count as u64);

        info!(
            pattern = %pattern,
            count = count,
            "Cache entries invalidated by pattern"
        );

        InvalidationResult {
            count,
            patterns: vec![pattern.to_string()],
        }
    }

    /// Invalida todas las entries de la coleccion de `key`.
    ///
    /// Equivale a `invalidate_many(key.collection())`, con la misma
    /// semantica de substring.
    pub fn invalidate_collection(&self, key: &QueryKey) -> InvalidationResult {
        self.invalidate_many(key.collection())
    }

    /// Invalida multiples patrones a la vez.
    ///
    /// Una key que coincide con varios patrones se cuenta una vez por patron.
    pub fn invalidate_by_patterns(&self, patterns: &[&str]) -> InvalidationResult {
        let mut total_count = 0;
        let mut all_patterns = Vec::new();

        for pattern in patterns {
            let result = self.invalidate_many(pattern);
            total_count += result.count;
            all_patterns.extend(result.patterns);
        }

        InvalidationResult {
            count: total_count,
            patterns: all_patterns,
        }
    }
}

//! Property tests for the query cache operations.

mod helpers;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use helpers::{manual_cache, manual_cache_with};
use pizarra_cache::{DEFAULT_STALE_TIME, QueryCache};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Keys con la convencion `<coleccion>[-<sufijo>]`.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(-[a-z0-9]{1,4})?"
}

/// Payloads JSON simples.
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,12}".prop_map(|s| json!({ "name": s })),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(|v| json!(v)),
    ]
}

fn entries_strategy() -> impl Strategy<Value = HashMap<String, Value>> {
    prop::collection::hash_map(key_strategy(), value_strategy(), 1..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: set seguido de get retorna el valor, fresco.
    #[test]
    fn prop_write_then_read(key in key_strategy(), value in value_strategy()) {
        let (cache, _clock) = manual_cache::<Value>();

        cache.set(key.clone(), value.clone());
        let entry = cache.get(&key);

        prop_assert!(entry.is_some());
        let entry = entry.unwrap();
        prop_assert_eq!(entry.value(), &value);
        prop_assert!(!entry.is_stale());
    }

    /// Property: una key nunca escrita no existe.
    #[test]
    fn prop_unwritten_key_is_absent(entries in entries_strategy(), probe in key_strategy()) {
        prop_assume!(!entries.contains_key(&probe));
        let (cache, _clock) = manual_cache::<Value>();

        for (key, value) in &entries {
            cache.set(key.clone(), value.clone());
        }

        prop_assert!(cache.get(&probe).is_none());
        prop_assert_eq!(cache.len(), entries.len());
    }

    /// Property: invalidate solo cambia el flag, nunca value ni stored_at.
    #[test]
    fn prop_invalidate_preserves_value(key in key_strategy(), value in value_strategy()) {
        let (cache, _clock) = manual_cache::<Value>();
        cache.set(key.clone(), value.clone());
        let before = cache.peek(&key).unwrap();

        prop_assert!(cache.invalidate(&key));
        let after = cache.get(&key).unwrap();

        prop_assert!(after.is_stale());
        prop_assert_eq!(after.value(), &value);
        prop_assert_eq!(after.stored_at(), before.stored_at());
    }

    /// Property: invalidate_many marca exactamente las keys que contienen el patron.
    #[test]
    fn prop_pattern_invalidation_is_substring_exact(
        entries in entries_strategy(),
        pattern in "[a-z0-9-]{1,3}",
    ) {
        let (cache, _clock) = manual_cache::<Value>();
        for (key, value) in &entries {
            cache.set(key.clone(), value.clone());
        }

        let result = cache.invalidate_many(&pattern);

        let expected: HashSet<&String> = entries.keys().filter(|k| k.contains(&pattern)).collect();
        prop_assert_eq!(result.count, expected.len());
        for (key, value) in &entries {
            let entry = cache.get(key).unwrap();
            prop_assert_eq!(entry.is_stale(), expected.contains(key), "key {} pattern {}", key, pattern);
            prop_assert_eq!(entry.value(), value);
        }
    }

    /// Property: reescribir una key limpia el flag stale.
    #[test]
    fn prop_rewrite_clears_staleness(
        key in key_strategy(),
        first in value_strategy(),
        second in value_strategy(),
    ) {
        let (cache, clock) = manual_cache::<Value>();
        cache.set(key.clone(), first);
        cache.invalidate(&key);
        clock.advance(DEFAULT_STALE_TIME * 2);
        prop_assert!(cache.get(&key).unwrap().is_stale());

        cache.set(key.clone(), second.clone());

        let entry = cache.get(&key).unwrap();
        prop_assert_eq!(entry.value(), &second);
        prop_assert!(!entry.is_stale());
    }

    /// Property: remove es terminal y repetirlo es un no-op.
    #[test]
    fn prop_remove_is_terminal(entries in entries_strategy()) {
        let (cache, _clock) = manual_cache::<Value>();
        for (key, value) in &entries {
            cache.set(key.clone(), value.clone());
        }

        for key in entries.keys() {
            prop_assert!(cache.remove(key));
            prop_assert!(cache.get(key).is_none());
            prop_assert!(!cache.remove(key));
        }
        prop_assert!(cache.is_empty());
    }

    /// Property: clear deja todas las keys ausentes.
    #[test]
    fn prop_clear_empties_store(entries in entries_strategy()) {
        let (cache, _clock) = manual_cache::<Value>();
        for (key, value) in &entries {
            cache.set(key.clone(), value.clone());
        }

        cache.clear();

        for key in entries.keys() {
            prop_assert!(cache.get(key).is_none());
        }
        prop_assert_eq!(cache.len(), 0);
    }

    /// Property: pasado el stale time la entry queda stale, con el valor intacto.
    #[test]
    fn prop_age_marks_stale(
        key in key_strategy(),
        value in value_strategy(),
        stale_secs in 1u64..3_600,
        extra_ms in 1u64..10_000,
    ) {
        let stale_time = Duration::from_secs(stale_secs);
        let (cache, clock) = manual_cache_with::<Value>(stale_time);
        cache.set(key.clone(), value.clone());

        clock.advance(stale_time + Duration::from_millis(extra_ms));
        let entry = cache.get(&key).unwrap();

        prop_assert!(entry.is_stale());
        prop_assert_eq!(entry.value(), &value);
    }

    /// Property: dentro del stale time la entry sigue fresca.
    #[test]
    fn prop_within_stale_time_is_fresh(
        key in key_strategy(),
        stale_secs in 1u64..3_600,
        fraction in 0u32..=1_000,
    ) {
        let stale_time = Duration::from_secs(stale_secs);
        let (cache, clock) = manual_cache_with::<Value>(stale_time);
        cache.set(key.clone(), json!(null));

        clock.advance(stale_time * fraction / 1_000);

        prop_assert!(!cache.get(&key).unwrap().is_stale());
    }

    /// Property: las lecturas nunca limpian el flag stale.
    #[test]
    fn prop_reads_never_clear_staleness(key in key_strategy(), reads in 1usize..8) {
        let (cache, _clock) = manual_cache::<Value>();
        cache.set(key.clone(), json!(1));
        cache.invalidate(&key);

        for _ in 0..reads {
            prop_assert!(cache.get(&key).unwrap().is_stale());
            prop_assert!(cache.peek(&key).unwrap().is_stale());
        }
    }
}

#[test]
fn test_cache_default_type_is_json() {
    let cache: QueryCache = QueryCache::default();
    cache.set("courses-list", json!([{"id": 1}]));
    assert_eq!(cache.stale_time(), DEFAULT_STALE_TIME);
    assert_eq!(cache.get("courses-list").unwrap().value()[0]["id"], 1);
}

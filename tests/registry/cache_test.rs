//! Tests for the shared reference cache

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use growth_screen::{EngineError, ReferenceCache};

use crate::utils::{REFERENCE_HEADERS, reference_batch, text_batch};

#[test]
fn test_source_is_read_once() {
    let cache = ReferenceCache::new();
    let reads = AtomicUsize::new(0);
    let read = || {
        reads.fetch_add(1, Ordering::SeqCst);
        Ok::<_, EngineError>(reference_batch())
    };

    let first = cache.get_or_load("who.csv", read).unwrap();
    let second = cache.get_or_load("who.csv", read).unwrap();

    assert_eq!(reads.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 6);
}

#[test]
fn test_read_errors_are_passed_through() {
    let cache = ReferenceCache::new();
    let result = cache.get_or_load("missing.csv", || {
        Err(EngineError::missing_field("gender", &[]))
    });

    assert!(matches!(result, Err(EngineError::SchemaError { .. })));
    assert!(cache.get("missing.csv").is_none());
}

#[test]
fn test_reload_swaps_store_without_touching_readers() {
    let cache = ReferenceCache::new();
    let before = cache
        .get_or_load("who.csv", || Ok::<_, EngineError>(reference_batch()))
        .unwrap();

    let revised = text_batch(
        &REFERENCE_HEADERS,
        &[&["F", "100", "11.1", "12.6", "13.9", "15.0", "16.1", "18.1", "20.1"]],
    );
    let after = cache.reload("who.csv", &revised).unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.len(), 6);
    assert_eq!(after.len(), 1);
    assert!(Arc::ptr_eq(&after, &cache.get("who.csv").unwrap()));
}

#[test]
fn test_sources_are_independent() {
    let cache = ReferenceCache::new();
    cache.reload("a.csv", &reference_batch()).unwrap();

    assert!(cache.get("b.csv").is_none());
    assert!(cache.evict("a.csv").is_some());
    assert!(cache.get("a.csv").is_none());
}

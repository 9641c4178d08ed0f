//! Integration Tests for the Cache Library
//!
//! Drives the public facade the way an embedding application would.

use call_history_cache::cache::{replay_to, CountCalls, STORE_METHOD};
use call_history_cache::{
    Cache, CacheError, FetchExt, History, KeyValueCache, MemoryBackend, SharedBackend,
    Value,
};

fn backend() -> SharedBackend {
    MemoryBackend::shared(1024)
}

#[test]
fn test_store_and_fetch_each_kind() {
    let cache = Cache::instrumented(backend());

    let text = cache.store(Value::from("hello")).unwrap();
    let bytes = cache.store(Value::from(b"\x00\x01".as_slice())).unwrap();
    let int = cache.store(Value::from(123)).unwrap();
    let float = cache.store(Value::from(0.5)).unwrap();

    assert_eq!(cache.fetch_str(&text).unwrap().as_deref(), Some("hello"));
    assert_eq!(cache.fetch(&bytes).unwrap(), Some(vec![0, 1]));
    assert_eq!(cache.fetch_str(&int).unwrap().as_deref(), Some("123"));
    assert_eq!(cache.fetch_str(&float).unwrap().as_deref(), Some("0.5"));
}

#[test]
fn test_fetch_int_of_big_endian_42() {
    let cache = Cache::instrumented(backend());

    let key = cache.store(Value::from(vec![0u8, 42])).unwrap();

    assert_eq!(cache.fetch_int(&key).unwrap(), Some(42));
}

#[test]
fn test_absent_key_for_every_variant() {
    let cache = Cache::instrumented(backend());

    assert!(cache.fetch("never-issued").unwrap().is_none());
    assert!(cache.fetch_str("never-issued").unwrap().is_none());
    assert!(cache.fetch_int("never-issued").unwrap().is_none());
    let decoded: Result<Option<usize>, CacheError> =
        cache.fetch_with("never-issued", |raw| Ok(raw.len()));
    assert!(decoded.unwrap().is_none());
}

#[test]
fn test_counter_and_logs_agree() {
    let backend = backend();
    let cache = Cache::instrumented(backend.clone());

    for value in ["first", "second", "third"] {
        cache.store(Value::from(value)).unwrap();
    }

    assert_eq!(cache.calls().unwrap(), 3);
    assert_eq!(
        backend.lrange("Cache.store:inputs", 0, -1).unwrap().len(),
        3
    );
    assert_eq!(
        backend.lrange("Cache.store:outputs", 0, -1).unwrap().len(),
        3
    );
}

#[test]
fn test_replay_output() {
    let backend = backend();
    let cache = Cache::instrumented(backend.clone());

    let k1 = cache.store(Value::from("foo")).unwrap();
    let k2 = cache.store(Value::from("bar")).unwrap();

    let mut out = Vec::new();
    replay_to(&mut out, backend.as_ref(), STORE_METHOD).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Cache.store was called 2 times:".to_string(),
            format!("Cache.store(*('foo',)) -> {}", k1),
            format!("Cache.store(*('bar',)) -> {}", k2),
        ]
    );
}

#[test]
fn test_replay_with_no_calls() {
    let mut out = Vec::new();
    replay_to(&mut out, backend().as_ref(), STORE_METHOD).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Cache.store was called 0 times:\n");
}

#[test]
fn test_flush_resets_instrumentation() {
    let backend = backend();
    let cache = Cache::instrumented(backend.clone());

    cache.store(Value::from("foo")).unwrap();
    let fresh = Cache::flushed(backend.clone()).unwrap();

    let history = History::load(backend.as_ref(), STORE_METHOD).unwrap();
    assert_eq!(history.calls, 0);
    assert!(history.records.is_empty());
    assert!(fresh.fetch("Cache.store").unwrap().is_none());
}

#[test]
fn test_custom_composition_order() {
    // History outermost: the counter is still bumped once per call
    let backend = backend();
    let counted = CountCalls::new(Cache::new(backend.clone()), backend.clone(), "Swapped.store");
    let cache = call_history_cache::cache::CallHistory::new(counted, backend.clone(), "Swapped.store");

    cache.store(Value::from(1)).unwrap();
    cache.store(Value::from(2)).unwrap();

    let history = History::load(backend.as_ref(), "Swapped.store").unwrap();
    assert_eq!(history.calls, 2);
    assert_eq!(history.records[1].input, "(2,)");
    assert_eq!(cache.inner().calls().unwrap(), 2);
}

#[test]
fn test_shared_backend_across_threads() {
    let backend = backend();
    let cache = std::sync::Arc::new(Cache::instrumented(backend.clone()));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    cache.store(Value::from(t * 100 + i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let history = History::load(backend.as_ref(), STORE_METHOD).unwrap();
    assert_eq!(history.calls, 100);
    assert_eq!(history.records.len(), 100);
}

//! Integration tests for the session store.

use serde_json::Value;
use session_store::{SessionData, SessionStore, StoreConfig, StoreError};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn store(ttl: Duration, sweep: Duration) -> SessionStore {
    let config = StoreConfig::new().ttl(ttl).sweep_interval(sweep).build();
    SessionStore::new(config)
}

fn payload(field: &str, value: &str) -> SessionData {
    let mut data = SessionData::new();
    data.insert(field.to_string(), Value::from(value));
    data
}

#[test]
fn test_basic_workflow() {
    let store = SessionStore::default();

    // Initially empty
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);

    // Create a session
    let key = store.create().expect("create failed");
    assert_eq!(store.len(), 1);
    assert!(store.contains(&key));

    // A fresh session has an empty payload
    let data = store.read(&key).expect("read failed");
    assert!(data.is_empty());

    // Update replaces the payload
    store.update(&key, payload("website", "example.org")).unwrap();
    let data = store.read(&key).unwrap();
    assert_eq!(data["website"], "example.org");

    // Delete
    assert!(store.delete(&key));
    assert!(!store.contains(&key));
    assert!(!store.delete(&key)); // Already deleted

    // Clear
    store.create().unwrap();
    store.create().unwrap();
    assert_eq!(store.len(), 2);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_creates_yield_distinct_keys() {
    let store = Arc::new(SessionStore::default());

    // 100 creates issued from parallel threads
    let handles: Vec<_> = (0..100)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create().expect("create failed"))
        })
        .collect();

    let keys: HashSet<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    // No collisions, no dropped inserts
    assert_eq!(keys.len(), 100);
    assert_eq!(store.len(), 100);
    for key in &keys {
        assert!(store.contains(key));
    }
}

#[test]
fn test_concurrent_updates_are_atomic() {
    let store = Arc::new(SessionStore::default());
    let key = store.create().unwrap();

    // Each thread repeatedly writes a two-field payload whose fields agree.
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let key = key.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let mut data = SessionData::new();
                    data.insert("writer".to_string(), Value::from(t));
                    data.insert("round".to_string(), Value::from(i));
                    store.update(&key, data).expect("update failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    // The final payload is exactly one submitted payload, never a merge:
    // both fields present, writer in range, round being the last one.
    let data = store.read(&key).unwrap();
    assert_eq!(data.len(), 2);
    let writer = data["writer"].as_u64().expect("writer field");
    assert!(writer < 8);
    assert_eq!(data["round"], Value::from(199));
}

#[test]
fn test_reads_see_consistent_snapshots() {
    let store = Arc::new(SessionStore::default());
    let key = store.create().unwrap();
    store.update(&key, payload("v", "0")).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        let key = key.clone();
        thread::spawn(move || {
            for i in 0..500 {
                let mut data = SessionData::new();
                data.insert("v".to_string(), Value::from(i.to_string()));
                data.insert("v_copy".to_string(), Value::from(i.to_string()));
                store.update(&key, data).unwrap();
            }
        })
    };

    // Concurrent readers must never see a half-written payload.
    for _ in 0..500 {
        let data = store.read(&key).unwrap();
        if data.len() == 2 {
            assert_eq!(data["v"], data["v_copy"]);
        }
    }

    writer.join().expect("writer panicked");
}

#[test]
fn test_session_not_reclaimed_before_ttl() {
    let store = store(Duration::from_millis(300), Duration::from_millis(20));

    let key = store.create().unwrap();

    // Well inside the TTL window the session must survive.
    thread::sleep(Duration::from_millis(150));
    assert!(store.read(&key).is_ok());
}

#[test]
fn test_idle_session_reclaimed_within_ttl_plus_sweep() {
    let store = store(Duration::from_millis(100), Duration::from_millis(20));

    let key = store.create().unwrap();
    assert!(store.contains(&key));

    // By ttl + a few sweep periods the session must be gone.
    let deadline = Instant::now() + Duration::from_millis(400);
    loop {
        match store.read(&key) {
            Err(StoreError::NotFound(_)) => break,
            Ok(_) => {
                assert!(Instant::now() < deadline, "session outlived ttl + sweep");
                thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

#[test]
fn test_update_resets_idle_clock() {
    let store = store(Duration::from_millis(400), Duration::from_millis(40));

    let key = store.create().unwrap();

    // Refresh well before the original creation would expire.
    thread::sleep(Duration::from_millis(200));
    store.update(&key, payload("a", "1")).unwrap();

    // Past creation + ttl, but within update + ttl: still alive.
    thread::sleep(Duration::from_millis(300));
    let data = store.read(&key).expect("session should have been refreshed");
    assert_eq!(data["a"], "1");
}

#[test]
fn test_reads_do_not_extend_life() {
    let store = store(Duration::from_millis(100), Duration::from_millis(20));

    let key = store.create().unwrap();

    // Keep reading while the idle clock runs out.
    for _ in 0..6 {
        thread::sleep(Duration::from_millis(25));
        let _ = store.read(&key);
    }

    // 150ms idle despite constant reads; give the sweeper a few more
    // periods to notice.
    thread::sleep(Duration::from_millis(100));
    assert!(matches!(
        store.read(&key),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn test_read_after_reclaim_returns_not_found() {
    let store = store(Duration::from_millis(50), Duration::from_millis(10));

    let key = store.create().unwrap();
    store.update(&key, payload("secret", "42")).unwrap();

    thread::sleep(Duration::from_millis(150));

    // Never stale data, and a failed update has no side effect either.
    match store.read(&key) {
        Err(StoreError::NotFound(k)) => assert_eq!(k, key),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(store.update(&key, payload("a", "1")).is_err());
    assert!(!store.contains(&key));
}

#[test]
fn test_manual_reclaim() {
    // Long sweep interval keeps the background reclaimer out of the way.
    let store = store(Duration::from_millis(40), Duration::from_secs(60));

    for _ in 0..5 {
        store.create().unwrap();
    }
    thread::sleep(Duration::from_millis(80));
    let fresh = store.create().unwrap();

    let reclaimed = store.reclaim_expired();
    assert_eq!(reclaimed, 5);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&fresh));

    let stats = store.stats();
    assert_eq!(stats.reclamations, 5);
}

#[test]
fn test_mixed_workload_under_reclamation() {
    let store = Arc::new(store(Duration::from_millis(60), Duration::from_millis(10)));

    // Writers churn sessions while the reclaimer races them. Nothing
    // may panic and every operation must either succeed or report
    // NotFound cleanly.
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100 {
                    let key = store.create().expect("create failed");
                    let _ = store.update(&key, payload("n", &i.to_string()));
                    let _ = store.read(&key);
                    if i % 3 == 0 {
                        store.delete(&key);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    // Everything left idles out eventually.
    thread::sleep(Duration::from_millis(200));
    assert!(store.is_empty());
}

#[test]
fn test_stats_accuracy() {
    let store = SessionStore::default();

    let key = store.create().unwrap();
    store.create().unwrap();
    store.update(&key, payload("a", "1")).unwrap();
    let _ = store.read(&key); // Hit
    let _ = store.read("missing"); // Miss
    store.delete(&key);

    let stats = store.stats();
    assert_eq!(stats.creates, 2);
    assert_eq!(stats.updates, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.deletes, 1);
    assert_eq!(stats.size, 1);
}

#[test]
fn test_store_clone_shares_data() {
    let store1 = SessionStore::default();
    let key = store1.create().unwrap();

    let store2 = store1.clone();

    // Both see the same session
    assert!(store2.contains(&key));

    // Modification through one is visible to the other
    store2.update(&key, payload("via", "clone")).unwrap();
    assert_eq!(store1.read(&key).unwrap()["via"], "clone");
}

#[test]
fn test_failing_key_source() {
    use session_store::{KeyGen, StoreResult};

    struct BrokenKeyGen;
    impl KeyGen for BrokenKeyGen {
        fn generate(&self) -> StoreResult<String> {
            Err(StoreError::KeyGeneration("no entropy".to_string()))
        }
    }

    let store = SessionStore::with_keygen(StoreConfig::default(), Box::new(BrokenKeyGen));

    let result = store.create();
    assert!(matches!(result, Err(StoreError::KeyGeneration(_))));
    assert!(store.is_empty());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // A serial run of updates behaves last-write-wins: the store
        // returns exactly the final payload, never a merge of earlier ones.
        #[test]
        fn final_read_equals_last_update(
            payloads in prop::collection::vec(
                prop::collection::hash_map("[a-z]{1,8}", "[a-z0-9]{0,12}", 0..5),
                1..20,
            )
        ) {
            let store = SessionStore::default();
            let key = store.create().unwrap();

            for fields in &payloads {
                let data: SessionData = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                    .collect();
                store.update(&key, data).unwrap();
            }

            let expected: SessionData = payloads
                .last()
                .unwrap()
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                .collect();
            prop_assert_eq!(store.read(&key).unwrap(), expected);
        }
    }
}

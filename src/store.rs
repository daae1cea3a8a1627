//! The main session store interface.
//!
//! This module provides the primary `SessionStore` type that users
//! interact with. It wraps the internal locked table and owns the
//! background reclaimer's lifetime.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::entry::SessionData;
use crate::error::StoreResult;
use crate::keygen::{KeyGen, RandomKeyGen};
use crate::reclaimer;
use crate::stats::{StatsSnapshot, StoreStats};
use crate::table::Table;

/// A thread-safe, in-memory session store with idle-TTL reclamation.
///
/// Sessions are created with a fresh random key, updated by replacing
/// their payload, and silently removed by a background sweep once they
/// have been idle longer than the configured TTL. Reads never extend a
/// session's life; only creation and update do.
///
/// # Example
/// ```
/// use session_store::{SessionStore, StoreConfig};
/// use std::time::Duration;
///
/// let config = StoreConfig::new()
///     .ttl(Duration::from_secs(300))
///     .build();
/// let store = SessionStore::new(config);
///
/// let key = store.create()?;
///
/// let mut data = session_store::SessionData::new();
/// data.insert("website".to_string(), "example.org".into());
/// store.update(&key, data)?;
///
/// let payload = store.read(&key)?;
/// assert_eq!(payload["website"], "example.org");
/// # Ok::<(), session_store::StoreError>(())
/// ```
///
/// # Thread safety
///
/// The store is safe to share across threads. Cloning a `SessionStore`
/// creates a new handle to the same underlying table:
///
/// ```
/// use session_store::SessionStore;
/// use std::thread;
///
/// let store = SessionStore::default();
///
/// let handles: Vec<_> = (0..4).map(|_| {
///     let store = store.clone();
///     thread::spawn(move || store.create().unwrap())
/// }).collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(store.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Internal table. The reclaimer holds only a `Weak` to it, so this
    /// `Arc` (and its clones) controls both the data and the sweeper's
    /// lifetime.
    table: Arc<Table>,
}

impl SessionStore {
    /// Create a new store and start its background reclaimer.
    ///
    /// The reclaimer runs for the lifetime of the store: it exits on its
    /// own once every handle has been dropped.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_keygen(config, Box::new(RandomKeyGen))
    }

    /// Create a new store with a caller-supplied key source.
    ///
    /// The store only requires that the source never silently return a
    /// duplicate of a currently live key and that it report generation
    /// failures as errors.
    pub fn with_keygen(config: StoreConfig, keygen: Box<dyn KeyGen>) -> Self {
        let period = config.effective_sweep_interval();
        let table = Arc::new(Table::new(config, keygen));

        reclaimer::spawn(Arc::downgrade(&table), period);

        Self { table }
    }

    /// Create a new session with an empty payload and return its key.
    ///
    /// Safe to call from many threads at once: concurrent creates never
    /// lose or duplicate keys.
    ///
    /// # Errors
    /// Returns [`StoreError::KeyGeneration`] when the key source cannot
    /// produce a usable key.
    ///
    /// [`StoreError::KeyGeneration`]: crate::StoreError::KeyGeneration
    pub fn create(&self) -> StoreResult<String> {
        self.table.create()
    }

    /// Get a consistent snapshot of the payload stored under `key`.
    ///
    /// Reading does not count as activity: it never postpones
    /// reclamation.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when the key has no live session,
    /// either because it never existed or because it has been reclaimed.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    pub fn read(&self, key: &str) -> StoreResult<SessionData> {
        self.table.read(key)
    }

    /// Replace the payload stored under `key` and reset its idle clock.
    ///
    /// The existence check and the write happen as one atomic step, so an
    /// update can never race the reclaimer into writing a dead entry.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] under the same conditions as
    /// [`read`](Self::read).
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    pub fn update(&self, key: &str, data: SessionData) -> StoreResult<()> {
        self.table.update(key, data)
    }

    /// Remove a session explicitly.
    ///
    /// Returns `true` if the key existed and was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.table.delete(key)
    }

    /// Check if a key currently has a live session.
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains(key)
    }

    /// Get the number of live sessions.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Remove all sessions.
    pub fn clear(&self) {
        self.table.clear();
    }

    /// Run one sweep immediately, without waiting for the reclaimer's
    /// next tick. Returns the number of sessions removed.
    pub fn reclaim_expired(&self) -> usize {
        self.table.reclaim_expired()
    }

    /// Get a snapshot of the store statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.table.stats().snapshot()
    }

    /// Get a reference to the internal statistics counters.
    ///
    /// Useful for integrating with external metrics systems.
    pub fn stats_ref(&self) -> Arc<StoreStats> {
        self.table.stats()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

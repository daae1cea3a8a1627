//! Internal locked session table.
//!
//! One `RwLock` guards the whole map: the write lock is the single
//! exclusion point for every mutation (create, update, delete, sweep),
//! so no operation can observe a partially applied change. This is the
//! low-level implementation; users should use `SessionStore` instead.

use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::config::StoreConfig;
use crate::entry::{Session, SessionData};
use crate::error::{StoreError, StoreResult};
use crate::keygen::KeyGen;
use crate::stats::StoreStats;

/// How many fresh keys `create` tries before giving up on a collision.
/// With 128-bit keys a second attempt is already vanishingly unlikely.
const MAX_KEY_ATTEMPTS: usize = 4;

/// The locked table mapping session key to entry.
pub(crate) struct Table {
    /// The actual storage. The map is the sole owner of every `Session`;
    /// removing an entry releases it.
    sessions: RwLock<IndexMap<String, Session>>,

    /// Configuration for this store instance.
    config: StoreConfig,

    /// The key source used by `create`.
    keygen: Box<dyn KeyGen>,

    /// Operation counters, updated outside the table lock.
    stats: Arc<StoreStats>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Table {
    pub(crate) fn new(config: StoreConfig, keygen: Box<dyn KeyGen>) -> Self {
        Self {
            sessions: RwLock::new(IndexMap::new()),
            config,
            keygen,
            stats: Arc::new(StoreStats::new()),
        }
    }

    /// Create a fresh session with an empty payload and return its key.
    ///
    /// The candidate key is generated before the lock is taken; the
    /// collision check and the insert happen as one step under the write
    /// lock, so concurrent creates can neither lose nor duplicate keys.
    pub(crate) fn create(&self) -> StoreResult<String> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = self.keygen.generate()?;

            let mut sessions = self.write_lock();
            if sessions.contains_key(&key) {
                // Collides with a live session; retry with a new key.
                continue;
            }
            sessions.insert(key.clone(), Session::new());
            drop(sessions);

            self.stats.record_create();
            return Ok(key);
        }

        Err(StoreError::KeyGeneration(format!(
            "no unused key after {} attempts",
            MAX_KEY_ATTEMPTS
        )))
    }

    /// Return a snapshot of the payload for `key`.
    ///
    /// The clone is taken under the read lock, so a concurrent update can
    /// never bleed into the returned map. Reading does not refresh the
    /// session's idle clock.
    pub(crate) fn read(&self, key: &str) -> StoreResult<SessionData> {
        let sessions = self.read_lock();
        match sessions.get(key) {
            Some(session) => {
                let data = session.data().clone();
                drop(sessions);
                self.stats.record_hit();
                Ok(data)
            }
            None => {
                drop(sessions);
                self.stats.record_miss();
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    /// Replace the payload for `key` and refresh its idle clock.
    ///
    /// The existence check and the write are a single atomic step under
    /// the write lock. Checking first and locking later would leave a
    /// window in which the reclaimer could remove the entry.
    pub(crate) fn update(&self, key: &str, data: SessionData) -> StoreResult<()> {
        let mut sessions = self.write_lock();
        match sessions.get_mut(key) {
            Some(session) => {
                session.replace(data);
                drop(sessions);
                self.stats.record_update();
                Ok(())
            }
            None => {
                drop(sessions);
                self.stats.record_miss();
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    /// Remove a session explicitly.
    ///
    /// Returns `true` if the key had a live entry.
    pub(crate) fn delete(&self, key: &str) -> bool {
        let mut sessions = self.write_lock();
        let existed = sessions.swap_remove(key).is_some();
        drop(sessions);

        if existed {
            self.stats.record_delete();
        }
        existed
    }

    /// Check if a key currently has a live session.
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.read_lock().contains_key(key)
    }

    /// Get the number of live sessions.
    pub(crate) fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all sessions.
    pub(crate) fn clear(&self) {
        let mut sessions = self.write_lock();
        sessions.clear();
        drop(sessions);
        self.stats.set_size(0);
    }

    /// Get a reference to the statistics.
    pub(crate) fn stats(&self) -> Arc<StoreStats> {
        Arc::clone(&self.stats)
    }

    /// Remove every session idle longer than the configured TTL.
    ///
    /// Called by the reclaimer on its period, and exposed through
    /// `SessionStore::reclaim_expired` for manual triggering. The whole
    /// scan-and-delete pass runs under one write lock acquisition, so a
    /// foreground operation never interleaves with a half-finished sweep.
    /// Every entry is judged against the same clock reading.
    pub(crate) fn reclaim_expired(&self) -> usize {
        let ttl = self.config.ttl;
        let now = Instant::now();
        let mut reclaimed = 0;

        let mut sessions = self.write_lock();
        sessions.retain(|_, session| {
            let expired = session.is_expired_at(ttl, now);
            if expired {
                reclaimed += 1;
            }
            !expired
        });
        drop(sessions);

        if reclaimed > 0 {
            self.stats.record_reclamations(reclaimed as u64);
        }
        reclaimed
    }

    // Private helper methods.
    //
    // A poisoned lock means some other thread panicked mid-operation.
    // None of our critical sections can leave the map structurally
    // broken, so we take the guard and keep going rather than panic.

    fn read_lock(&self) -> RwLockReadGuard<'_, IndexMap<String, Session>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, IndexMap<String, Session>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

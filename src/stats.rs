//! Statistics and metrics for the store.
//!
//! Atomic counters tracking store operations, enabling observability
//! without touching the table lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for store operations.
///
/// All counters are atomic and can be safely read from multiple threads.
/// Use `SessionStore::stats()` to get a snapshot.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Number of sessions created.
    creates: AtomicU64,

    /// Number of successful reads (session found).
    hits: AtomicU64,

    /// Number of failed reads and updates (session absent or reclaimed).
    misses: AtomicU64,

    /// Number of successful payload updates.
    updates: AtomicU64,

    /// Number of explicit delete operations that removed a session.
    deletes: AtomicU64,

    /// Number of sessions removed by the reclaimer.
    reclamations: AtomicU64,

    /// Current number of live sessions.
    size: AtomicU64,
}

impl StoreStats {
    /// Create a new stats instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_create(&self) {
        self.creates.fetch_add(1, Ordering::Relaxed);
        self.size.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.size.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record one reclaimed session.
    pub fn record_reclamation(&self) {
        self.record_reclamations(1);
    }

    /// Record a whole sweep's worth of reclaimed sessions.
    pub fn record_reclamations(&self, count: u64) {
        self.reclamations.fetch_add(count, Ordering::Relaxed);
        self.size.fetch_sub(count, Ordering::Relaxed);
    }

    pub fn set_size(&self, size: u64) {
        self.size.store(size, Ordering::Relaxed);
    }

    // Getters for reading statistics

    pub fn creates(&self) -> u64 {
        self.creates.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    pub fn reclamations(&self) -> u64 {
        self.reclamations.load(Ordering::Relaxed)
    }

    pub fn size(&self) -> u64 {
        self.size.load(Ordering::Relaxed)
    }

    /// Create a snapshot of the current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            creates: self.creates(),
            hits: self.hits(),
            misses: self.misses(),
            updates: self.updates(),
            deletes: self.deletes(),
            reclamations: self.reclamations(),
            size: self.size(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
///
/// Unlike `StoreStats`, this struct contains plain values (not atomics)
/// and can be easily serialized or logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub creates: u64,
    pub hits: u64,
    pub misses: u64,
    pub updates: u64,
    pub deletes: u64,
    pub reclamations: u64,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = StoreStats::new();
        assert_eq!(stats.creates(), 0);
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.size(), 0);
    }

    #[test]
    fn test_create_and_reclaim_track_size() {
        let stats = StoreStats::new();

        stats.record_create();
        stats.record_create();
        assert_eq!(stats.size(), 2);
        assert_eq!(stats.creates(), 2);

        stats.record_reclamation();
        assert_eq!(stats.size(), 1);
        assert_eq!(stats.reclamations(), 1);
    }

    #[test]
    fn test_snapshot() {
        let stats = StoreStats::new();
        stats.record_create();
        stats.record_hit();
        stats.record_update();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.creates, 1);
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.updates, 1);
        assert_eq!(snapshot.size, 1);
    }
}

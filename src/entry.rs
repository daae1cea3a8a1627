//! A single session record and its payload type.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The payload of a session: an arbitrary mapping from field name to a
/// weakly typed value. The store never inspects its contents.
pub type SessionData = HashMap<String, Value>;

/// One session entry.
///
/// Tracks the payload and the moment it was last written. `last_updated`
/// is the sole input to the expiration decision; reads do not refresh it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The session payload.
    pub(crate) data: SessionData,

    /// Set at creation and on every successful update.
    pub(crate) last_updated: Instant,
}

impl Session {
    /// Create a fresh session with an empty payload.
    pub fn new() -> Self {
        Self {
            data: SessionData::new(),
            last_updated: Instant::now(),
        }
    }

    /// Replace the payload and refresh `last_updated` to now.
    pub fn replace(&mut self, data: SessionData) {
        self.data = data;
        self.last_updated = Instant::now();
    }

    /// Check whether this session has been idle longer than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, Instant::now())
    }

    /// Check expiry against a caller-supplied clock reading.
    /// Lets one sweep evaluate the whole table against a single `now`.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_updated) > ttl
    }

    /// Get a reference to the payload.
    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Get the last-updated timestamp.
    pub fn last_updated(&self) -> Instant {
        self.last_updated
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

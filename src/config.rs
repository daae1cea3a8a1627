//! Configuration for the session store.
//!
//! A builder over the two timing knobs: the idle TTL and the reclaimer's
//! sweep interval.

use std::time::Duration;

/// Default idle TTL when none is configured.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Configuration for creating a new store instance.
///
/// ```
/// use session_store::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::new()
///     .ttl(Duration::from_secs(30))
///     .sweep_interval(Duration::from_secs(5))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum idle duration before a session becomes eligible for
    /// reclamation.
    pub(crate) ttl: Duration,

    /// How often the reclaimer scans the table. `None` derives the
    /// interval from the TTL.
    pub(crate) sweep_interval: Option<Duration>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            sweep_interval: None,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the idle TTL. Sessions untouched for longer than this are
    /// removed by the next sweep.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the sweep interval explicitly.
    ///
    /// When not set, the interval defaults to `ttl / 5`, which bounds a
    /// session's lifetime after its last update to `[ttl, ttl * 1.2)`.
    /// A shorter interval tightens that bound at the cost of more
    /// frequent full-table scans. Zero resets to the derived default.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = if interval.is_zero() {
            None
        } else {
            Some(interval)
        };
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the configured TTL.
    pub fn get_ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the effective sweep interval (explicit, or derived `ttl / 5`,
    /// never below one millisecond).
    pub fn effective_sweep_interval(&self) -> Duration {
        self.sweep_interval
            .unwrap_or(self.ttl / 5)
            .max(Duration::from_millis(1))
    }
}

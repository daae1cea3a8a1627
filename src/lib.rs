//! # Session Store
//!
//! A thread-safe, in-memory session store for Rust with idle-TTL
//! reclamation by a background sweeper.
//!
//! ## Features
//!
//! - **Thread-safe**: Share across threads with `Clone` (uses `Arc` internally)
//! - **Idle TTL**: Sessions untouched past a configurable TTL are reclaimed
//! - **Background sweep**: A dedicated task removes expired sessions on a
//!   fixed period, bounding memory growth
//! - **Weakly typed payloads**: Each session holds an arbitrary map of
//!   string field to JSON value; the store never inspects contents
//! - **Statistics**: Track creates, reads, updates, and reclamations
//!
//! ## Quick start
//!
//! ```rust
//! use session_store::{SessionStore, SessionData, StoreConfig};
//! use std::time::Duration;
//!
//! // Sessions idle for more than 5 minutes get reclaimed.
//! let config = StoreConfig::new()
//!     .ttl(Duration::from_secs(300))
//!     .build();
//! let store = SessionStore::new(config);
//!
//! // Create a session; the store hands back a fresh key.
//! let key = store.create()?;
//!
//! // Replace its payload (this also resets the idle clock).
//! let mut data = SessionData::new();
//! data.insert("website".to_string(), "example.org".into());
//! store.update(&key, data)?;
//!
//! // Read back a consistent snapshot.
//! let payload = store.read(&key)?;
//! assert_eq!(payload["website"], "example.org");
//! # Ok::<(), session_store::StoreError>(())
//! ```
//!
//! ## Expiration semantics
//!
//! Only creation and update count as activity; reads never postpone
//! reclamation. Because the sweep is periodic, a session last touched at
//! time `T` is removed somewhere in `[T + ttl, T + ttl + sweep_interval)`.

// Public API
pub mod config;
pub mod entry;
pub mod error;
pub mod keygen;
pub mod stats;
pub mod store;

pub use config::StoreConfig;
pub use entry::{Session, SessionData};
pub use error::{StoreError, StoreResult};
pub use keygen::{KeyGen, RandomKeyGen};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::SessionStore;

// Internal modules - not part of the public API
pub(crate) mod reclaimer;
pub(crate) mod table;

// Wire protocol support for the server/client binaries
pub mod command;
pub use command::Command;

pub mod utils;
pub use utils::buffer_to_array;

pub mod cli;
pub use cli::{Cli, ClientCommand};

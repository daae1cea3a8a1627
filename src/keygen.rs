//! Session key generation.
//!
//! The store only requires that the source never silently hands out a
//! duplicate of a live key and that it reports a distinct error when
//! generation is impossible. The trait exists so tests (and embedders)
//! can swap in their own source.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::{StoreError, StoreResult};

/// Number of random bytes per key; rendered as hex, so keys are 32 chars.
const KEY_LEN: usize = 16;

/// A source of fresh, statistically unique session keys.
pub trait KeyGen: Send + Sync {
    /// Produce one candidate key.
    ///
    /// Statistical uniqueness is enough; the store re-checks candidates
    /// against live keys before committing one.
    fn generate(&self) -> StoreResult<String>;
}

/// The default key source: 128 bits from the operating system's CSPRNG,
/// hex-encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeyGen;

impl KeyGen for RandomKeyGen {
    fn generate(&self) -> StoreResult<String> {
        use std::fmt::Write;

        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| StoreError::KeyGeneration(err.to_string()))?;

        let mut key = String::with_capacity(KEY_LEN * 2);
        for byte in bytes {
            // Writing to a String cannot fail.
            let _ = write!(key, "{:02x}", byte);
        }
        Ok(key)
    }
}

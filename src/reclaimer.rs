//! Background reclamation of idle sessions.
//!
//! One dedicated thread per store, started at construction. Each period it
//! takes the same write lock the foreground operations use and sweeps the
//! whole table in a single pass. Because the sweep is periodic rather than
//! event-driven, a session's true removal time lands anywhere in
//! `[ttl, ttl + period)` after its last update.

use std::sync::Weak;
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::table::Table;

/// Spawn the reclaimer thread for `table`.
///
/// The thread holds only a `Weak` reference: once every store handle has
/// been dropped the upgrade fails and the thread exits on its next tick.
/// That is the cooperative stop check, taken once per sweep, outside the
/// table lock.
pub(crate) fn spawn(table: Weak<Table>, period: Duration) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        debug!(?period, "session reclaimer started");

        loop {
            thread::sleep(period);

            let Some(table) = table.upgrade() else {
                debug!("store dropped, reclaimer exiting");
                break;
            };

            let reclaimed = table.reclaim_expired();
            if reclaimed > 0 {
                debug!(reclaimed, remaining = table.len(), "swept idle sessions");
            }
        }
    })
}

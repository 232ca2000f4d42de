//! Per-rule, non-blocking mutual exclusion.
//!
//! A rule id is either absent (unlocked) or present (locked) in the
//! underlying set; a second caller observing it locked gets `None`
//! immediately rather than queueing or retrying, matching the "no queueing,
//! no retry inside the core" requirement.
//!
//! This is the reference primitive a [`crate::ports::ConfigPort`]
//! implementation wraps to back `lock_lld_rule`/`unlock_lld_rule` — the
//! driver itself only ever calls through that trait, never this table
//! directly; see the `FakeConfig` in `driver.rs`'s test module for the
//! intended wiring.

use dashmap::DashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RuleLockTable {
    locked: Arc<DashSet<u64>>,
}

impl RuleLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to acquire the lock for `itemid`. Returns `None` if another
    /// invocation already holds it.
    pub fn try_lock(&self, itemid: u64) -> Option<RuleLockGuard> {
        if self.locked.insert(itemid) {
            Some(RuleLockGuard {
                table: self.locked.clone(),
                itemid,
            })
        } else {
            None
        }
    }
}

/// Releases the lock for `itemid` when dropped, on every exit path —
/// including early returns and panics in test fakes.
pub struct RuleLockGuard {
    table: Arc<DashSet<u64>>,
    itemid: u64,
}

impl Drop for RuleLockGuard {
    fn drop(&mut self) {
        self.table.remove(&self.itemid);
    }
}

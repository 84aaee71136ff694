//! In-memory revocation cache for logged-out tokens
//!
//! Entries are keyed by token id and hold the revoked token's original expiry.
//! Two mechanisms bound memory:
//! - `contains` deletes a stale entry it finds (lazy eviction on read)
//! - `sweep` walks every shard and drops stale entries (periodic cleanup)
//!
//! The map is sharded, so a sweep only ever locks one shard at a time and
//! concurrent validations on other shards proceed unhindered.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::token::RevocationEntry;

/// Concurrent token-id → expiry blacklist
pub struct RevocationCache {
    entries: DashMap<String, RevocationEntry>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RevocationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationCache")
            .field("size", &self.entries.len())
            .finish()
    }
}

impl RevocationCache {
    /// Creates an empty cache reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Records `token_id` as revoked until `original_expiry`.
    ///
    /// Inserting an id again overwrites its entry.
    pub fn insert(&self, token_id: impl Into<String>, original_expiry: DateTime<Utc>) {
        let entry = RevocationEntry::new(original_expiry, self.clock.now());
        self.entries.insert(token_id.into(), entry);
    }

    /// Returns whether `token_id` is currently revoked.
    ///
    /// A stale entry (its token already past expiry) is removed and reported
    /// as not revoked.
    pub fn contains(&self, token_id: &str) -> bool {
        let now = self.clock.now();

        if self
            .entries
            .remove_if(token_id, |_, entry| entry.is_stale_at(now))
            .is_some()
        {
            tracing::debug!(token_id, "Evicted stale revocation entry on lookup");
            return false;
        }

        self.entries.contains_key(token_id)
    }

    /// Snapshot of the entry for `token_id`, if retained
    pub fn entry(&self, token_id: &str) -> Option<RevocationEntry> {
        self.entries.get(token_id).map(|entry| *entry.value())
    }

    /// Removes every stale entry and returns how many were dropped
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            let stale = entry.is_stale_at(now);
            if stale {
                removed += 1;
            }
            !stale
        });

        removed
    }

    /// Number of retained entries
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Periodic sweep of expired revocation entries
//!
//! Lazy eviction only reclaims entries that are looked up again. The sweeper
//! covers the rest: tokens revoked at logout and never presented afterwards.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use tg_shared::SweeperConfig;

use super::revocation::RevocationCache;

/// Runs [`RevocationCache::sweep`] on a fixed interval
pub struct RevocationSweeper {
    cache: Arc<RevocationCache>,
    config: SweeperConfig,
}

impl RevocationSweeper {
    /// Create a new sweeper for `cache`
    pub fn new(cache: Arc<RevocationCache>, config: SweeperConfig) -> Self {
        Self { cache, config }
    }

    /// Run a single sweep cycle
    pub fn run_sweep(&self) -> SweepResult {
        let before = self.cache.size();
        let removed = self.cache.sweep();
        let after = self.cache.size();

        info!(before, after, removed, "Revocation cache sweep completed");

        SweepResult {
            before,
            after,
            removed,
        }
    }

    /// Start the sweeper as a background task
    ///
    /// The first sweep runs one full interval after start. Abort the returned
    /// handle to stop sweeping. Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation sweeper is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds.max(1));

        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = period.as_secs(),
                "Revocation sweeper started"
            );

            let mut interval_timer = tokio::time::interval(period);
            // The first tick of a tokio interval completes immediately
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;
                self.run_sweep();
            }
        });

        Some(handle)
    }

    pub fn config(&self) -> &SweeperConfig {
        &self.config
    }
}

/// Result of a sweep cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Entries retained before the sweep
    pub before: usize,
    /// Entries retained after the sweep
    pub after: usize,
    /// Entries removed by the sweep itself
    pub removed: usize,
}

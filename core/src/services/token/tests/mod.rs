//! Shared fixtures for token service tests


use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::clock::{Clock, ManualClock};
use crate::services::token::{RevocationCache, TokenManager, TokenManagerConfig};

pub(super) const TEST_SECRET: &str = "test-secret-key-at-least-32-chars!!";

/// Fixed issuance instant used across tests
pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0).unwrap()
}

pub(super) fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(t0()))
}

pub(super) fn create_test_manager(clock: Arc<ManualClock>) -> TokenManager {
    create_manager_with(clock, TokenManagerConfig::new(TEST_SECRET, 1))
}

pub(super) fn create_manager_with(clock: Arc<ManualClock>, config: TokenManagerConfig) -> TokenManager {
    let clock: Arc<dyn Clock> = clock;
    let cache = Arc::new(RevocationCache::new(clock.clone()));
    TokenManager::new(config, cache, clock).expect("Failed to create token manager")
}

/// Replaces the character at `index` with a different base64url character
pub(super) fn tamper_at(token: &str, index: usize) -> String {
    let mut bytes = token.as_bytes().to_vec();
    bytes[index] = match bytes[index] {
        b'A' => b'B',
        _ => b'A',
    };
    String::from_utf8(bytes).unwrap()
}

//! Integration tests for the session token lifecycle

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    use tg_core::{
        Clock, ManualClock, RevocationSweeper, TokenError, TokenManager, TokenManagerConfig,
        TokenManagerHandle,
    };
    use tg_shared::SweeperConfig;

    const SECRET: &str = "integration-test-secret-0123456789";

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn setup() -> (Arc<ManualClock>, TokenManagerHandle) {
        let clock = Arc::new(ManualClock::new(t0()));
        let handle = TokenManagerHandle::new(clock.clone());
        handle.init(SECRET, 1).expect("init failed");
        (clock, handle)
    }

    fn manager(handle: &TokenManagerHandle) -> &TokenManager {
        handle.manager().expect("manager not initialized")
    }

    #[test]
    fn test_revoke_then_expire_scenario() {
        let (clock, handle) = setup();
        let cache = handle.revocation_cache();

        let token = handle.issue("u1").unwrap();

        clock.set(t0() + Duration::minutes(30));
        let claims = handle.validate(&token).unwrap();
        assert_eq!(claims.subject, "u1");

        handle.revoke(&claims).unwrap();
        assert_eq!(handle.validate(&token), Err(TokenError::Revoked));
        assert_eq!(cache.size(), 1);

        clock.set(t0() + Duration::minutes(61));
        assert_eq!(handle.validate(&token), Err(TokenError::Expired));

        // The failed lookup evicts the stale entry
        assert!(!cache.contains(&claims.jti));
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_validate_returns_issued_subject() {
        let (_clock, handle) = setup();

        for subject in ["alice", "bob", "用户-7", "", "a b c"] {
            let token = handle.issue(subject).unwrap();
            assert_eq!(handle.validate(&token).unwrap().subject, subject);
        }
    }

    #[test]
    fn test_expired_regardless_of_revocation() {
        let (clock, handle) = setup();
        let revoked = handle.issue("u1").unwrap();
        let untouched = handle.issue("u2").unwrap();
        handle.logout(&revoked).unwrap();

        clock.advance(Duration::hours(1));

        assert_eq!(handle.validate(&revoked), Err(TokenError::Expired));
        assert_eq!(handle.validate(&untouched), Err(TokenError::Expired));
    }

    #[test]
    fn test_refresh_keeps_subject_and_extends_expiry() {
        let (clock, handle) = setup();
        let token = handle.issue("u1").unwrap();
        let original = handle.validate(&token).unwrap();

        clock.advance(Duration::seconds(1));
        let refreshed = handle.refresh(&token).unwrap();
        let claims = handle.validate(&refreshed).unwrap();

        assert_eq!(claims.subject, original.subject);
        assert_ne!(claims.jti, original.jti);
        assert!(claims.exp > original.exp);
        assert!(handle.validate(&token).is_ok());
    }

    #[test]
    fn test_sweep_removes_exactly_stale_entries() {
        let (clock, handle) = setup();
        let cache = handle.revocation_cache();

        let early: Vec<String> = (0..4).map(|i| handle.issue(&format!("early-{}", i)).unwrap()).collect();
        for token in &early {
            handle.logout(token).unwrap();
        }

        clock.advance(Duration::minutes(45));
        let late: Vec<String> = (0..3).map(|i| handle.issue(&format!("late-{}", i)).unwrap()).collect();
        for token in &late {
            handle.logout(token).unwrap();
        }
        assert_eq!(cache.size(), 7);

        // Early tokens expired at t0+60m, late ones expire at t0+105m
        clock.set(t0() + Duration::minutes(90));
        let sweeper = RevocationSweeper::new(cache.clone(), SweeperConfig::default());
        let result = sweeper.run_sweep();

        assert_eq!(result.removed, 4);
        assert_eq!(result.before - result.after, 4);
        assert_eq!(cache.size(), 3);
        for token in &late {
            assert_eq!(handle.validate(token), Err(TokenError::Revoked));
        }
    }

    #[test]
    fn test_managers_share_nothing_but_the_cache_they_are_given() {
        let (_clock, handle) = setup();
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(t0()));
        let other = TokenManager::new(
            TokenManagerConfig::new("second-service-secret-abcdefghij", 1),
            Arc::new(tg_core::RevocationCache::new(clock.clone())),
            clock,
        )
        .unwrap();

        let token = other.issue("u1").unwrap();
        assert_eq!(handle.validate(&token), Err(TokenError::InvalidSignature));
        assert!(other.validate(&token).is_ok());
        assert!(manager(&handle).revocation_cache().is_empty());
    }
}

//! Integration tests for concurrent revocation and validation

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use std::thread;

    use tg_core::{Claims, ManualClock, RevocationSweeper, TokenManagerHandle};
    use tg_shared::SweeperConfig;

    const SECRET: &str = "concurrency-test-secret-0123456789";

    fn setup() -> (Arc<ManualClock>, Arc<TokenManagerHandle>) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let handle = TokenManagerHandle::new(clock.clone());
        handle.init(SECRET, 1).expect("init failed");
        (clock, Arc::new(handle))
    }

    #[test]
    fn test_concurrent_revoke_and_validate() {
        let (_clock, handle) = setup();

        let to_revoke: Vec<Claims> = (0..100)
            .map(|i| {
                let token = handle.issue(&format!("revoked-{}", i)).unwrap();
                handle.validate(&token).unwrap()
            })
            .collect();
        let to_validate: Vec<String> = (0..100)
            .map(|i| handle.issue(&format!("active-{}", i)).unwrap())
            .collect();

        thread::scope(|scope| {
            let mut workers = Vec::with_capacity(200);
            for claims in &to_revoke {
                let handle = &handle;
                workers.push(scope.spawn(move || handle.revoke(claims).is_ok()));
            }
            for token in &to_validate {
                let handle = &handle;
                workers.push(scope.spawn(move || handle.validate(token).is_ok()));
            }

            for worker in workers {
                assert!(worker.join().unwrap());
            }
        });

        assert_eq!(handle.revocation_cache().size(), 100);
    }

    #[test]
    fn test_validation_continues_during_sweep() {
        let (clock, handle) = setup();
        let cache = handle.revocation_cache();

        for i in 0..500 {
            let token = handle.issue(&format!("stale-{}", i)).unwrap();
            handle.logout(&token).unwrap();
        }
        clock.advance(Duration::minutes(61));

        let active: Vec<String> = (0..50)
            .map(|i| handle.issue(&format!("active-{}", i)).unwrap())
            .collect();
        let sweeper = RevocationSweeper::new(cache.clone(), SweeperConfig::default());

        thread::scope(|scope| {
            scope.spawn(|| sweeper.run_sweep());
            for token in &active {
                let handle = &handle;
                scope.spawn(move || assert!(handle.validate(token).is_ok()));
            }
        });

        assert!(cache.is_empty());
    }
}

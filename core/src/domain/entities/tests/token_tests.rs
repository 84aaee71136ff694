//! Unit tests for token entities

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::token::{AuthContext, Claims, RevocationEntry, JWT_ISSUER};

fn issued_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

#[test]
fn test_new_claims_timestamps() {
    let now = issued_at();
    let claims = Claims::new("u1", JWT_ISSUER, now, Duration::hours(1));

    assert_eq!(claims.subject, "u1");
    assert_eq!(claims.iss, "tokengate");
    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.nbf, claims.iat);
    assert_eq!(claims.exp, claims.iat + 3600);
    assert!(claims.nbf <= claims.iat && claims.iat < claims.exp);
    assert_eq!(claims.expires_at(), now + Duration::hours(1));
    assert_eq!(claims.issued_at(), now);
}

#[test]
fn test_token_ids_are_unique() {
    let now = issued_at();
    let a = Claims::new("u1", JWT_ISSUER, now, Duration::hours(1));
    let b = Claims::new("u1", JWT_ISSUER, now, Duration::hours(1));

    assert_ne!(a.jti, b.jti);
    assert_eq!(a.token_id().len(), 36);
}

#[test]
fn test_claims_validity_window() {
    let now = issued_at();
    let claims = Claims::new("u1", JWT_ISSUER, now, Duration::hours(1));

    assert!(claims.is_active_at(now));
    assert!(!claims.is_expired_at(now + Duration::minutes(59)));
    assert!(claims.is_expired_at(now + Duration::hours(1)));
    assert!(!claims.is_active_at(now + Duration::hours(1)));
    assert!(!claims.is_active_at(now - Duration::seconds(1)));
    assert_eq!(claims.remaining_at(now + Duration::minutes(45)), Duration::minutes(15));
}

#[test]
fn test_claims_payload_keys() {
    let claims = Claims::new("u1", JWT_ISSUER, issued_at(), Duration::hours(1));
    let json = serde_json::to_value(&claims).unwrap();

    assert_eq!(json["user_id"], "u1");
    assert!(json.get("subject").is_none());
    for key in ["jti", "iss", "iat", "nbf", "exp"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn test_revocation_entry_staleness() {
    let expiry = issued_at() + Duration::hours(1);
    let entry = RevocationEntry::new(expiry, issued_at());

    assert!(!entry.is_stale_at(expiry - Duration::seconds(1)));
    assert!(!entry.is_stale_at(expiry));
    assert!(entry.is_stale_at(expiry + Duration::seconds(1)));
}

#[test]
fn test_auth_context_from_claims() {
    let claims = Claims::new("u42", JWT_ISSUER, issued_at(), Duration::hours(1));
    let context = AuthContext::from(&claims);

    assert_eq!(context.subject, "u42");
    assert_eq!(context.token_id, claims.jti);
}

#[test]
fn test_claims_expiry_saturates_instead_of_overflowing() {
    let claims = Claims::new("u1", JWT_ISSUER, issued_at(), Duration::MAX);

    assert_eq!(claims.exp, chrono::DateTime::<Utc>::MAX_UTC.timestamp());
    assert!(claims.is_active_at(issued_at()));
}

//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "tokengate";

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Longest accepted token lifetime (ten years)
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 87_600;

/// Claims structure for JWT payload
///
/// The subject travels under the `user_id` key so tokens stay readable by
/// clients issued before this service existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (opaque user identifier)
    #[serde(rename = "user_id")]
    pub subject: String,

    /// JWT ID (unique identifier for the token, used as the revocation key)
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a freshly issued token
    ///
    /// # Arguments
    ///
    /// * `subject` - The user identifier
    /// * `issuer` - Issuer claim value
    /// * `now` - Issuance instant; also used as `nbf`
    /// * `lifetime` - How long the token stays valid
    ///
    /// # Returns
    ///
    /// A new `Claims` instance with a random `jti`
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        // Saturates instead of overflowing; configured lifetimes are bounded well below this
        let expiry = now
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            subject: subject.into(),
            jti: Uuid::new_v4().to_string(),
            iss: issuer.into(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// The token identifier used as the revocation key
    pub fn token_id(&self) -> &str {
        &self.jti
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Checks if the claims are inside their validity window at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        let now = now.timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        from_unix(self.exp)
    }

    /// Issuance as a timestamp
    pub fn issued_at(&self) -> DateTime<Utc> {
        from_unix(self.iat)
    }

    /// Time left before expiry, negative once expired
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at() - now
    }
}

fn from_unix(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Blacklist record for a token revoked before its natural expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevocationEntry {
    /// Expiry copied from the revoked token's `exp`
    pub original_expiry: DateTime<Utc>,

    /// When the entry was inserted
    pub revoked_at: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(original_expiry: DateTime<Utc>, revoked_at: DateTime<Utc>) -> Self {
        Self {
            original_expiry,
            revoked_at,
        }
    }

    /// An entry is stale once its token could no longer pass expiry checks
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now > self.original_expiry
    }
}

/// Authenticated identity attached to request-scoped context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Subject extracted from the token
    pub subject: String,
    /// JWT ID for tracking and logout
    pub token_id: String,
}

impl From<&Claims> for AuthContext {
    fn from(claims: &Claims) -> Self {
        Self {
            subject: claims.subject.clone(),
            token_id: claims.jti.clone(),
        }
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.subject,
            token_id: claims.jti,
        }
    }
}

//! Configuration for the token manager

use chrono::Duration;
use tg_shared::JwtConfig;

use crate::domain::entities::token::{JWT_ISSUER, MAX_TOKEN_LIFETIME_HOURS};
use crate::errors::TokenError;

/// When a still-valid token may be exchanged for a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Any valid, non-revoked token may be refreshed at any time
    #[default]
    Unconditional,
    /// Only tokens with at most this much validity left may be refreshed
    WithinWindow(Duration),
}

/// Configuration for the token manager
#[derive(Clone)]
pub struct TokenManagerConfig {
    /// JWT signing secret (HS256)
    pub secret: String,
    /// Lifetime of every issued token
    pub lifetime: Duration,
    /// Issuer claim stamped into tokens
    pub issuer: String,
    /// Refresh policy
    pub refresh_policy: RefreshPolicy,
}

impl std::fmt::Debug for TokenManagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManagerConfig")
            .field("secret", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .field("issuer", &self.issuer)
            .field("refresh_policy", &self.refresh_policy)
            .finish()
    }
}

impl TokenManagerConfig {
    /// Creates a configuration from a secret and a lifetime in hours.
    ///
    /// An hour count too large to represent is kept as an out-of-range
    /// lifetime and rejected by [`validate`](Self::validate).
    pub fn new(secret: impl Into<String>, lifetime_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime: saturating_hours(lifetime_hours),
            issuer: JWT_ISSUER.to_string(),
            refresh_policy: RefreshPolicy::Unconditional,
        }
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }

    /// Rejects configurations the manager must not start with
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.secret.trim().is_empty() {
            return Err(TokenError::configuration("signing secret must not be empty"));
        }
        if self.lifetime <= Duration::zero() {
            return Err(TokenError::configuration(format!(
                "token lifetime must be positive, got {}s",
                self.lifetime.num_seconds()
            )));
        }
        // Claims carry whole seconds; a shorter lifetime would yield iat == exp
        if self.lifetime < Duration::seconds(1) {
            return Err(TokenError::configuration("token lifetime must be at least one second"));
        }
        if self.lifetime > Duration::hours(MAX_TOKEN_LIFETIME_HOURS) {
            return Err(TokenError::configuration(format!(
                "token lifetime must not exceed {} hours",
                MAX_TOKEN_LIFETIME_HOURS
            )));
        }
        if let RefreshPolicy::WithinWindow(window) = self.refresh_policy {
            if window <= Duration::zero() {
                return Err(TokenError::configuration("refresh window must be positive"));
            }
        }
        if self.issuer.is_empty() {
            return Err(TokenError::configuration("issuer must not be empty"));
        }
        Ok(())
    }
}

impl Default for TokenManagerConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenManagerConfig {
    fn from(config: &JwtConfig) -> Self {
        let refresh_policy = match config.refresh_window_minutes {
            Some(minutes) => {
                RefreshPolicy::WithinWindow(saturating(Duration::try_minutes(minutes), minutes))
            }
            None => RefreshPolicy::Unconditional,
        };

        Self {
            secret: config.secret.clone(),
            lifetime: saturating_hours(config.expire_hours),
            issuer: config.issuer.clone(),
            refresh_policy,
        }
    }
}

fn saturating_hours(hours: i64) -> Duration {
    saturating(Duration::try_hours(hours), hours)
}

/// Clamps an unrepresentable duration to the bound `validate` rejects
fn saturating(duration: Option<Duration>, units: i64) -> Duration {
    duration.unwrap_or(if units < 0 { Duration::MIN } else { Duration::MAX })
}

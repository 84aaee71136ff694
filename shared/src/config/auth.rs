//! Session token and revocation sweeper configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Upper bound for `expire_hours` (ten years)
const MAX_EXPIRE_HOURS: i64 = 87_600;

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Symmetric secret used to sign and verify tokens
    pub secret: String,

    /// Token lifetime in hours
    pub expire_hours: i64,

    /// Issuer claim stamped into every token
    pub issuer: String,

    /// When set, refresh is only allowed this many minutes before expiry
    pub refresh_window_minutes: Option<i64>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expire_hours: 24,
            issuer: String::from("tokengate"),
            refresh_window_minutes: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in hours
    pub fn with_expire_hours(mut self, hours: i64) -> Self {
        self.expire_hours = hours;
        self
    }

    /// Restrict refresh to the last `minutes` of a token's life
    pub fn with_refresh_window_minutes(mut self, minutes: i64) -> Self {
        self.refresh_window_minutes = Some(minutes);
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Reject settings the token manager cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::invalid("jwt.secret", "secret must not be empty"));
        }
        if self.expire_hours <= 0 {
            return Err(ConfigError::invalid(
                "jwt.expire_hours",
                format!("lifetime must be positive, got {}", self.expire_hours),
            ));
        }
        if self.expire_hours > MAX_EXPIRE_HOURS {
            return Err(ConfigError::invalid(
                "jwt.expire_hours",
                format!("lifetime must not exceed {} hours, got {}", MAX_EXPIRE_HOURS, self.expire_hours),
            ));
        }
        if let Some(window) = self.refresh_window_minutes {
            if window <= 0 {
                return Err(ConfigError::invalid(
                    "jwt.refresh_window_minutes",
                    format!("refresh window must be positive, got {}", window),
                ));
            }
        }
        Ok(())
    }
}

/// Periodic revocation sweep configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SweeperConfig {
    /// How often to sweep expired revocation entries (in seconds)
    pub interval_seconds: u64,

    /// Whether the background sweep runs at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // hourly
            enabled: true,
        }
    }
}

impl SweeperConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.interval_seconds == 0 {
            return Err(ConfigError::invalid(
                "sweeper.interval_seconds",
                "interval must be at least one second",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expire_hours, 24);
        assert_eq!(config.issuer, "tokengate");
        assert!(config.refresh_window_minutes.is_none());
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_expire_hours(2)
            .with_refresh_window_minutes(60);

        assert_eq!(config.expire_hours, 2);
        assert_eq!(config.refresh_window_minutes, Some(60));
        assert!(!config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_rejects_empty_secret() {
        let config = JwtConfig::new("   ");
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "jwt.secret"),
            other => panic!("Expected invalid secret, got {:?}", other),
        }
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_lifetime() {
        assert!(JwtConfig::new("secret").with_expire_hours(0).validate().is_err());
        assert!(JwtConfig::new("secret").with_expire_hours(-3).validate().is_err());
    }

    #[test]
    fn test_jwt_config_rejects_oversized_lifetime() {
        assert!(JwtConfig::new("secret").with_expire_hours(87_600).validate().is_ok());
        assert!(JwtConfig::new("secret").with_expire_hours(87_601).validate().is_err());
        assert!(JwtConfig::new("secret").with_expire_hours(i64::MAX).validate().is_err());
    }

    #[test]
    fn test_sweeper_config() {
        let config = SweeperConfig::default();
        assert_eq!(config.interval_seconds, 3600);
        assert!(config.enabled);

        let zero = SweeperConfig { interval_seconds: 0, enabled: true };
        assert!(zero.validate().is_err());

        let disabled = SweeperConfig { interval_seconds: 0, enabled: false };
        assert!(disabled.validate().is_ok());
    }
}

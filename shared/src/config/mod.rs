//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session token and revocation sweeper configuration
//! - `environment` - Deployment environment detection
//! - `logging` - Log level and output format
//!
//! Values are layered: environment-specific defaults, then an optional
//! configuration file, then environment variable overrides.

pub mod auth;
pub mod environment;
pub mod logging;

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;

// Re-export commonly used types
pub use auth::{JwtConfig, SweeperConfig};
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};

/// Environment variables that override file values, paired with their keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("JWT_SECRET", "jwt.secret"),
    ("JWT_EXPIRE_HOURS", "jwt.expire_hours"),
    ("JWT_ISSUER", "jwt.issuer"),
    ("JWT_REFRESH_WINDOW_MINUTES", "jwt.refresh_window_minutes"),
    ("SWEEPER_INTERVAL_SECONDS", "sweeper.interval_seconds"),
    ("SWEEPER_ENABLED", "sweeper.enabled"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Revocation sweep configuration
    pub sweeper: SweeperConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create the default configuration for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            jwt: JwtConfig::default(),
            sweeper: SweeperConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from a file, with environment variables taking precedence.
    ///
    /// A missing file is not an error; defaults and environment overrides still apply.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if self.environment.requires_explicit_secret() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::invalid(
                "jwt.secret",
                format!("the built-in secret is not allowed in {}", self.environment),
            ));
        }
        self.sweeper.validate()?;
        Ok(())
    }

    fn build(path: Option<&Path>) -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mut builder = Self::defaults_for(environment)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults_for(environment: Environment) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::for_environment(environment);
        let builder = Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("jwt.secret", defaults.jwt.secret)?
            .set_default("jwt.expire_hours", defaults.jwt.expire_hours)?
            .set_default("jwt.issuer", defaults.jwt.issuer)?
            .set_default("sweeper.interval_seconds", defaults.sweeper.interval_seconds)?
            .set_default("sweeper.enabled", defaults.sweeper.enabled)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format.as_str())?;
        Ok(builder)
    }
}

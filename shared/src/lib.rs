//! Shared configuration and error types for the TokenGate workspace
//!
//! This crate provides functionality used across the token subsystem:
//! - Configuration types and layered loading (defaults, file, environment)
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use crate::config::{
    AppConfig, Environment, JwtConfig, LogFormat, LoggingConfig, SweeperConfig,
};
pub use crate::errors::{error_codes, ConfigError, ErrorResponse, IntoErrorResponse};

//! Domain layer containing the token entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    AuthContext, Claims, RevocationEntry, DEFAULT_TOKEN_LIFETIME_HOURS, JWT_ISSUER, MAX_TOKEN_LIFETIME_HOURS,
};

//! Domain entities for the token lifecycle.

pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{
    AuthContext, Claims, RevocationEntry,
    DEFAULT_TOKEN_LIFETIME_HOURS, JWT_ISSUER, MAX_TOKEN_LIFETIME_HOURS,
};

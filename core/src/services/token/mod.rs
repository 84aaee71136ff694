//! Token service module for session JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 token encoding and verification
//! - Issuance, validation, refresh and logout
//! - In-memory revocation with lazy eviction
//! - Background sweeping of expired revocation entries

mod bearer;
mod cleanup;
mod codec;
mod config;
mod handle;
mod revocation;
mod service;

#[cfg(test)]
mod tests;

pub use bearer::{extract_bearer_token, BEARER_SCHEME};
pub use cleanup::{RevocationSweeper, SweepResult};
pub use codec::{TokenCodec, SIGNING_ALGORITHM};
pub use config::{RefreshPolicy, TokenManagerConfig};
pub use handle::TokenManagerHandle;
pub use revocation::RevocationCache;
pub use service::TokenManager;

//! Init-once handle around the token manager
//!
//! Startup creates the handle (and the revocation cache inside it) before the
//! signing secret is known, hands clones of the `Arc` to the middleware,
//! logout handler and sweeper, then calls [`TokenManagerHandle::init`] once.
//! Every token operation before that fails with `NotInitialized`.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::token::{AuthContext, Claims};
use crate::errors::TokenError;

use super::config::TokenManagerConfig;
use super::revocation::RevocationCache;
use super::service::TokenManager;

/// Shared, lazily initialized token manager
pub struct TokenManagerHandle {
    manager: OnceCell<TokenManager>,
    revocations: Arc<RevocationCache>,
    clock: Arc<dyn Clock>,
}

impl TokenManagerHandle {
    /// Creates an uninitialized handle with a fresh revocation cache
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            manager: OnceCell::new(),
            revocations: Arc::new(RevocationCache::new(clock.clone())),
            clock,
        }
    }

    /// Initializes the manager from a secret and a lifetime in hours
    pub fn init(&self, secret: &str, lifetime_hours: i64) -> Result<(), TokenError> {
        self.init_with(TokenManagerConfig::new(secret, lifetime_hours))
    }

    /// Initializes the manager from a full configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The manager is ready
    /// * `Err(TokenError::Configuration)` - The configuration was rejected
    /// * `Err(TokenError::AlreadyInitialized)` - `init` already succeeded
    pub fn init_with(&self, config: TokenManagerConfig) -> Result<(), TokenError> {
        if self.manager.get().is_some() {
            return Err(TokenError::AlreadyInitialized);
        }

        let manager = TokenManager::new(config, self.revocations.clone(), self.clock.clone())?;
        self.manager
            .set(manager)
            .map_err(|_| TokenError::AlreadyInitialized)?;

        tracing::info!("Token manager initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.manager.get().is_some()
    }

    /// The initialized manager
    pub fn manager(&self) -> Result<&TokenManager, TokenError> {
        self.manager.get().ok_or(TokenError::NotInitialized)
    }

    /// Revocation cache, available before initialization for the sweeper
    pub fn revocation_cache(&self) -> Arc<RevocationCache> {
        self.revocations.clone()
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.manager()?.issue(subject)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.manager()?.validate(token)
    }

    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        self.manager()?.refresh(token)
    }

    pub fn revoke(&self, claims: &Claims) -> Result<(), TokenError> {
        self.manager()?.revoke(claims);
        Ok(())
    }

    pub fn logout(&self, token: &str) -> Result<Claims, TokenError> {
        self.manager()?.logout(token)
    }

    pub fn authenticate(&self, authorization: &str) -> Result<AuthContext, TokenError> {
        self.manager()?.authenticate(authorization)
    }
}

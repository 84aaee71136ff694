//! Token manager: issue, validate, refresh and revoke session tokens

use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::token::{AuthContext, Claims};
use crate::errors::TokenError;

use super::bearer::extract_bearer_token;
use super::codec::TokenCodec;
use super::config::{RefreshPolicy, TokenManagerConfig};
use super::revocation::RevocationCache;

/// Orchestrates the codec and the revocation cache.
///
/// A token moves through `Issued → Active → {Expired | Revoked}`; neither end
/// state can be left. Secret and lifetime are fixed at construction, and the
/// revocation cache is shared with the sweeper.
pub struct TokenManager {
    codec: TokenCodec,
    config: TokenManagerConfig,
    revocations: Arc<RevocationCache>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("config", &self.config)
            .field("revocations", &self.revocations)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Creates a new token manager
    ///
    /// # Arguments
    ///
    /// * `config` - Secret, lifetime, issuer and refresh policy
    /// * `revocations` - Revocation cache shared with the sweeper
    /// * `clock` - Time source for issuance and expiry checks
    ///
    /// # Returns
    ///
    /// * `Ok(TokenManager)` - Ready to serve requests
    /// * `Err(TokenError::Configuration)` - Empty secret or non-positive lifetime
    pub fn new(
        config: TokenManagerConfig,
        revocations: Arc<RevocationCache>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        config.validate()?;

        Ok(Self {
            codec: TokenCodec::new(config.secret.as_bytes()),
            config,
            revocations,
            clock,
        })
    }

    /// Issues a new token for `subject`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Signed token valid from now until now + lifetime
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::new(
            subject,
            self.config.issuer.as_str(),
            self.clock.now(),
            self.config.lifetime,
        );
        let token = self.codec.encode(&claims)?;

        tracing::debug!(subject, token_id = %claims.jti, exp = claims.exp, "Issued token");
        Ok(token)
    }

    /// Verifies a token's signature, validity window and revocation state
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The token is authentic, current and not revoked
    /// * `Err(TokenError)` - `Malformed`, `InvalidSignature`, `Expired`,
    ///   `NotYetValid` or `Revoked`
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self
            .codec
            .decode(token, self.clock.now())
            .map_err(|e| {
                tracing::warn!(error_code = e.error_code(), "Rejected token");
                e
            })?;

        if self.revocations.contains(&claims.jti) {
            tracing::warn!(
                error_code = TokenError::Revoked.error_code(),
                token_id = %claims.jti,
                "Rejected revoked token"
            );
            return Err(TokenError::Revoked);
        }

        tracing::debug!(subject = %claims.subject, token_id = %claims.jti, "Validated token");
        Ok(claims)
    }

    /// Revokes the token described by `claims` until its natural expiry.
    ///
    /// `claims` must come from a successful [`validate`](Self::validate); they
    /// are not verified again.
    pub fn revoke(&self, claims: &Claims) {
        self.revocations.insert(claims.jti.as_str(), claims.expires_at());
        tracing::info!(
            subject = %claims.subject,
            token_id = %claims.jti,
            exp = claims.exp,
            "Revoked token"
        );
    }

    /// Validates `token` and revokes it, returning the revoked claims
    pub fn logout(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.validate(token)?;
        self.revoke(&claims);
        Ok(claims)
    }

    /// Exchanges a valid token for a brand-new one for the same subject.
    ///
    /// The presented token is not revoked; it stays valid until its own
    /// expiry unless the caller also calls [`revoke`](Self::revoke).
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - New token with a new id and fresh timestamps
    /// * `Err(TokenError)` - Any `validate` failure, or `RefreshNotAllowed`
    ///   when a refresh window is configured and not yet reached
    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.validate(token)?;

        if let RefreshPolicy::WithinWindow(window) = self.config.refresh_policy {
            let remaining = claims.remaining_at(self.clock.now());
            if remaining > window {
                return Err(TokenError::RefreshNotAllowed {
                    seconds_remaining: remaining.num_seconds(),
                });
            }
        }

        let refreshed = self.issue(&claims.subject)?;
        tracing::debug!(subject = %claims.subject, previous_token_id = %claims.jti, "Refreshed token");
        Ok(refreshed)
    }

    /// Authenticates a raw `Authorization` header value
    ///
    /// # Returns
    ///
    /// * `Ok(AuthContext)` - Subject and token id for request-scoped context
    /// * `Err(TokenError::Malformed)` - Missing `Bearer` scheme or empty token
    /// * `Err(TokenError)` - Any `validate` failure
    pub fn authenticate(&self, authorization: &str) -> Result<AuthContext, TokenError> {
        let token = extract_bearer_token(authorization).ok_or(TokenError::Malformed)?;
        self.validate(token).map(AuthContext::from)
    }

    /// Revocation cache shared with the sweeper
    pub fn revocation_cache(&self) -> &Arc<RevocationCache> {
        &self.revocations
    }

    pub fn config(&self) -> &TokenManagerConfig {
        &self.config
    }
}

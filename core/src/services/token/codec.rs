//! Signed token codec (compact JWS, HS256)
//!
//! The codec holds only immutable keys, so one instance can be shared by any
//! number of threads. Time is passed in by the caller; the codec never reads
//! the system clock.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// The only signing method accepted on decode
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

const SIGNING_ALGORITHM_NAME: &str = "HS256";

/// Minimal view of the JOSE header, read before any key is involved
#[derive(Deserialize)]
struct RawHeader {
    alg: Option<String>,
}

/// Encodes claims into signed tokens and verifies them back
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a codec signing with `secret`
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = vec![SIGNING_ALGORITHM];
        // exp/nbf are checked against the injected clock in `decode`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Serializes and signs `claims`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact `header.payload.signature` token
    /// * `Err(TokenError::TokenGenerationFailed)` - Serialization failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(SIGNING_ALGORITHM);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies `token` and returns its claims
    ///
    /// # Arguments
    ///
    /// * `token` - Compact token string
    /// * `now` - Instant used for the `exp` and `nbf` checks
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and `nbf <= now < exp`
    /// * `Err(TokenError::Malformed)` - Not a three-segment token with a JSON header and claims
    /// * `Err(TokenError::InvalidSignature)` - Signature mismatch or any algorithm other than HS256
    /// * `Err(TokenError::Expired)` - `now >= exp`
    /// * `Err(TokenError::NotYetValid)` - `now < nbf`
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        Self::check_algorithm(token)?;

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::MissingAlgorithm => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                _ => TokenError::Malformed,
            })?;

        let claims = token_data.claims;
        let now = now.timestamp();
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        if now < claims.nbf {
            return Err(TokenError::NotYetValid);
        }

        Ok(claims)
    }

    /// Rejects tokens whose header names anything but HS256.
    ///
    /// Done by hand because an unknown `alg` such as `none` fails header
    /// deserialization inside jsonwebtoken and would surface as a parse error.
    fn check_algorithm(token: &str) -> Result<(), TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(_payload), Some(_signature), None) =
            (segments.next(), segments.next(), segments.next(), segments.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| TokenError::Malformed)?;
        let raw: RawHeader =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)?;

        match raw.alg.as_deref() {
            Some(SIGNING_ALGORITHM_NAME) => Ok(()),
            Some(other) => {
                tracing::warn!(algorithm = other, "Rejected token with disallowed signing method");
                Err(TokenError::InvalidSignature)
            }
            None => Err(TokenError::Malformed),
        }
    }
}

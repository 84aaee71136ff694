//! Token lifecycle error types
//!
//! Every validation failure is terminal for the call that produced it: the
//! caller maps it to an access-denial response and the client must obtain a
//! new token instead of retrying. Messages are bilingual (English and Chinese).

use thiserror::Error;
use tg_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Token-related errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token | 令牌格式错误")]
    Malformed,

    #[error("Token signature verification failed | 令牌签名验证失败")]
    InvalidSignature,

    #[error("Token expired | 令牌已过期")]
    Expired,

    #[error("Token not yet valid | 令牌尚未生效")]
    NotYetValid,

    #[error("Token revoked | 令牌已被撤销")]
    Revoked,

    #[error("Token manager not initialized | 令牌管理器未初始化")]
    NotInitialized,

    #[error("Token manager already initialized | 令牌管理器已初始化")]
    AlreadyInitialized,

    #[error("Token generation failed | 令牌生成失败")]
    TokenGenerationFailed,

    #[error("Refresh not allowed yet, {seconds_remaining}s of validity remain | 暂不允许刷新，剩余有效期 {seconds_remaining} 秒")]
    RefreshNotAllowed { seconds_remaining: i64 },

    #[error("Invalid token configuration: {message} | 令牌配置无效: {message}")]
    Configuration { message: String },
}

impl TokenError {
    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Malformed => error_codes::TOKEN_MALFORMED,
            TokenError::InvalidSignature => error_codes::TOKEN_INVALID_SIGNATURE,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::NotYetValid => error_codes::TOKEN_NOT_YET_VALID,
            TokenError::Revoked => error_codes::TOKEN_REVOKED,
            TokenError::NotInitialized => error_codes::NOT_INITIALIZED,
            TokenError::AlreadyInitialized => error_codes::ALREADY_INITIALIZED,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
            TokenError::RefreshNotAllowed { .. } => error_codes::REFRESH_NOT_ALLOWED,
            TokenError::Configuration { .. } => error_codes::CONFIGURATION_ERROR,
        }
    }

    /// HTTP status the outer layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            TokenError::Malformed
            | TokenError::InvalidSignature
            | TokenError::Expired
            | TokenError::NotYetValid
            | TokenError::Revoked => 401,
            TokenError::RefreshNotAllowed { .. } => 409,
            TokenError::NotInitialized
            | TokenError::AlreadyInitialized
            | TokenError::TokenGenerationFailed
            | TokenError::Configuration { .. } => 500,
        }
    }

    /// Whether the failure is caused by the presented token rather than the server
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        TokenError::Configuration {
            message: message.into(),
        }
    }
}

impl From<tg_shared::ConfigError> for TokenError {
    fn from(err: tg_shared::ConfigError) -> Self {
        TokenError::configuration(err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        err.to_error_response()
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self {
            TokenError::RefreshNotAllowed { seconds_remaining } => {
                response.add_detail("seconds_remaining", seconds_remaining)
            }
            _ => response,
        }
    }
}

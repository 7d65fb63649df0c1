use thiserror::Error;

/// Business errors for token and authorization workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token email does not match requested scope")]
    OwnershipMismatch,
    #[error("invalid identity payload: {0}")]
    InvalidPayload(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("auth misconfigured: {0}")]
    Config(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::InvalidToken(_) => 1002,
            AuthError::OwnershipMismatch => 1003,
            AuthError::InvalidPayload(_) => 1004,
            AuthError::TokenError(_) => 1101,
            AuthError::Config(_) => 1201,
        }
    }
}

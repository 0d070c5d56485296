use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not a {expected} token")]
    WrongTokenType { expected: &'static str },

    #[error("Refresh lifetime ({refresh_hours}h) must not be shorter than access lifetime ({access_hours}h)")]
    InvalidLifetime {
        access_hours: i64,
        refresh_hours: i64,
    },
}

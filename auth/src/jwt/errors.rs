use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation deliberately has a single failure variant: a caller learns that a token
/// was rejected, never whether it was malformed, forged, signed with another algorithm
/// or expired.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid or expired")]
    InvalidToken,
}

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Authorization header is required")]
    Missing,

    #[error("Invalid authorization header format. Expected: Bearer <token>")]
    InvalidFormat,
}

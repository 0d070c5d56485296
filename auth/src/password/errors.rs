use thiserror::Error;

/// Error type for password operations.
///
/// Hashing and verification failures are recoverable; callers surface them
/// as internal errors rather than terminating the process.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

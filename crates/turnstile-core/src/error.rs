use thiserror::Error;

/// Application-wide error types for Turnstile.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Wrong password, or a missing/invalid bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Password hashing failed.
    #[error("Hash error: {0}")]
    HashError(String),

    /// Token signing failed.
    #[error("Token error: {0}")]
    TokenError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid process configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the message is safe to show to the caller verbatim.
    ///
    /// Internal failures carry driver or library detail and are replaced by
    /// a generic message at the HTTP boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::NotFound(_) | AppError::Unauthorized(_)
        )
    }
}

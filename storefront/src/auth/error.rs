//! Error types for authentication and session persistence.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Authentication failures, shown to the user as a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password combination was rejected by the mock backend.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration form: the two passwords differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A required form field was empty.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The remote endpoint answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// Message from the response body, or a generic one
        message: String,
    },

    /// The remote endpoint could not be reached.
    #[error("Authentication service unavailable: {0}")]
    Transport(String),
}

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem failure.
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session could not be serialized.
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The in-memory lock was poisoned.
    #[error("Session storage lock poisoned")]
    LockPoisoned,
}

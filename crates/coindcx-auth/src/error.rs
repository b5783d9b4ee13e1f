//! Error types for authentication operations

/// Errors that can occur while loading credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Request parameters could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

//! Error types for client construction and request building
//!
//! These never cross the endpoint methods: anything that goes wrong while
//! serving a call is reported as a [`coindcx_types::Failure`] instead.

use coindcx_auth::AuthError;

/// Errors that can occur while configuring the client or building a request
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP client could not be created
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential loading or payload signing failed
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Root URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for REST client setup
pub type RestResult<T> = Result<T, RestError>;

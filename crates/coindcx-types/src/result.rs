//! Normalized outcome of a CoinDCX API call

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_codes::{
    ErrorKind, RecoveryStrategy, FORBIDDEN_CODE, FORBIDDEN_MESSAGE, INVALID_CREDENTIALS_CODE,
    INVALID_CREDENTIALS_MESSAGE, NOT_FOUND_CODE, NOT_FOUND_MESSAGE, UNCLASSIFIED_CODE,
    UNCLASSIFIED_MESSAGE,
};

/// Structured failure record
///
/// Serializes as `{"code": .., "error": <kind label>, "message": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} ({code}): {message}")]
pub struct Failure {
    /// CoinDCX code, HTTP status, or native transport error code
    pub code: String,
    /// Failure category
    #[serde(rename = "error")]
    pub kind: ErrorKind,
    /// Human readable description
    pub message: String,
}

impl Failure {
    /// Create a new failure record
    pub fn new(code: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind,
            message: message.into(),
        }
    }

    /// Default catch-all failure
    pub fn unclassified() -> Self {
        Self::new(UNCLASSIFIED_CODE, ErrorKind::Unclassified, UNCLASSIFIED_MESSAGE)
    }

    /// Resource or endpoint not found
    pub fn not_found() -> Self {
        Self::new(NOT_FOUND_CODE, ErrorKind::NotFound, NOT_FOUND_MESSAGE)
    }

    /// Request signature rejected
    pub fn invalid_credentials() -> Self {
        Self::new(
            INVALID_CREDENTIALS_CODE,
            ErrorKind::InvalidCredentials,
            INVALID_CREDENTIALS_MESSAGE,
        )
    }

    /// Access to the resource is forbidden
    pub fn forbidden() -> Self {
        Self::new(FORBIDDEN_CODE, ErrorKind::Forbidden, FORBIDDEN_MESSAGE)
    }

    /// Host could not be resolved or connected to
    pub fn host_unreachable(code: impl Into<String>, base_url: &str) -> Self {
        Self::new(
            code,
            ErrorKind::HostUnreachable,
            format!("Could not resolve host: {}", base_url),
        )
    }

    /// Transport failed for any other reason
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, ErrorKind::TransportError, message)
    }

    /// Get the recovery strategy for this failure
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        self.kind.recovery_strategy()
    }

    /// Check if this failure is worth retrying as-is
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result of a CoinDCX API call
///
/// The success payload defaults to the raw JSON body.
pub type ApiResult<T = Value> = Result<T, Failure>;

/// Helpers on raw JSON results
pub trait ApiResultExt {
    /// Decode a successful JSON payload into a typed model
    ///
    /// A payload that does not match `T` becomes an unclassified failure.
    fn decode<T: DeserializeOwned>(self) -> ApiResult<T>;
}

impl ApiResultExt for ApiResult<Value> {
    fn decode<T: DeserializeOwned>(self) -> ApiResult<T> {
        let value = self?;
        serde_json::from_value(value).map_err(|e| {
            Failure::new(
                UNCLASSIFIED_CODE,
                ErrorKind::Unclassified,
                format!("Unable to decode the response body: {}", e),
            )
        })
    }
}

//! CoinDCX error taxonomy with recovery strategies
//!
//! Every failed call is reduced to one of a small set of [`ErrorKind`]s.
//! Connection-level kinds are kept apart from HTTP-level kinds so callers
//! can tell a transient network problem from an application rejection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Code used when a failure cannot be attributed to a known CoinDCX code
pub const UNCLASSIFIED_CODE: &str = "1000";
/// Code returned by CoinDCX for unknown resources
pub const NOT_FOUND_CODE: &str = "404";
/// Code returned by CoinDCX for a rejected signature
pub const INVALID_CREDENTIALS_CODE: &str = "401";
/// HTTP status code reported for forbidden requests
pub const FORBIDDEN_CODE: &str = "403";

/// Message attached to unclassified failures
pub const UNCLASSIFIED_MESSAGE: &str = "Unable to identify the type of error.";
/// Message attached to not-found failures
pub const NOT_FOUND_MESSAGE: &str = "We could not locate the resource or the endpoint given.";
/// Message attached to invalid-credential failures
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Your API Request Signature is invalid.";
/// Message attached to forbidden failures
pub const FORBIDDEN_MESSAGE: &str = "You don't have permission to access this resource.";

/// Recovery strategy for handling a failure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecoveryStrategy {
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Fix or refresh the API credentials, then retry
    Reauthenticate,
    /// Cannot recover programmatically
    Fatal,
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default retry for transient network errors
    pub fn network_retry() -> Self {
        Self::Retry {
            delay_ms: 1000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Retry { .. } | Self::Reauthenticate)
    }
}

/// Category of a failed call
///
/// Serializes as the human readable label used in the `error` field of a
/// failure record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The host could not be resolved or connected to
    #[serde(rename = "Host Not Found")]
    HostUnreachable,
    /// Any other failure raised by the HTTP transport
    #[serde(rename = "Transport Error")]
    TransportError,
    /// CoinDCX reported code 404
    #[serde(rename = "Resource Not Found")]
    NotFound,
    /// CoinDCX reported code 401
    #[serde(rename = "Invalid Credentials")]
    InvalidCredentials,
    /// HTTP 403 without a CoinDCX code
    #[serde(rename = "Forbidden")]
    Forbidden,
    /// Server errors and any client error shape not listed above
    #[serde(rename = "Invalid")]
    Unclassified,
}

impl ErrorKind {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::HostUnreachable => "Host Not Found",
            Self::TransportError => "Transport Error",
            Self::NotFound => "Resource Not Found",
            Self::InvalidCredentials => "Invalid Credentials",
            Self::Forbidden => "Forbidden",
            Self::Unclassified => "Invalid",
        }
    }

    /// Whether the request never produced an HTTP response
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::HostUnreachable | Self::TransportError)
    }

    /// Get the recovery strategy for this kind
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::HostUnreachable | Self::TransportError => RecoveryStrategy::network_retry(),
            Self::InvalidCredentials => RecoveryStrategy::Reauthenticate,
            Self::NotFound | Self::Forbidden => RecoveryStrategy::Fatal,
            Self::Unclassified => RecoveryStrategy::Manual,
        }
    }

    /// Check if a failure of this kind is worth retrying as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Retry { .. })
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_are_retryable() {
        assert!(ErrorKind::HostUnreachable.is_connection_failure());
        assert!(ErrorKind::TransportError.is_retryable());
        assert_eq!(
            ErrorKind::HostUnreachable.recovery_strategy().initial_delay(),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn test_http_failures_are_not_retryable() {
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::InvalidCredentials,
            ErrorKind::Forbidden,
            ErrorKind::Unclassified,
        ] {
            assert!(!kind.is_connection_failure());
            assert!(!kind.is_retryable());
        }
    }

    #[test]
    fn test_recovery_strategies() {
        assert_eq!(
            ErrorKind::InvalidCredentials.recovery_strategy(),
            RecoveryStrategy::Reauthenticate
        );
        assert!(ErrorKind::InvalidCredentials.recovery_strategy().allows_retry());
        assert_eq!(ErrorKind::Forbidden.recovery_strategy(), RecoveryStrategy::Fatal);
        assert_eq!(ErrorKind::Unclassified.recovery_strategy(), RecoveryStrategy::Manual);
    }

    #[test]
    fn test_label_matches_serialized_form() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"Resource Not Found\"");
        assert_eq!(ErrorKind::Unclassified.to_string(), "Invalid");
    }
}

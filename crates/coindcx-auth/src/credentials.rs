//! Authentication credentials for the CoinDCX API
//!
//! Implements HMAC-SHA256 signing as required by CoinDCX's private endpoints.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};
use crate::params::RequestParams;

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "COINDCX_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "COINDCX_SECRET";

/// Parameter name injected into signed payloads
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (sent in the `X-AUTH-APIKEY` header)
    api_key: String,
    /// API secret (HMAC key, never sent)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINDCX_KEY` and `COINDCX_SECRET`. Empty values count as unset.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = read_env(API_KEY_ENV)?;
        let api_secret = read_env(API_SECRET_ENV)?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a payload, returning the lowercase hex HMAC-SHA256 digest
    pub fn sign(&self, payload: &str) -> String {
        hmac_sha256_hex(self.api_secret.expose_secret().as_bytes(), payload.as_bytes())
    }
}

fn read_env(name: &str) -> AuthResult<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::EnvVarNotSet(name.to_string()))
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretString with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Compute the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`
pub fn hmac_sha256_hex(secret: &[u8], payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Current Unix time in milliseconds
pub fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Payload produced by [`RequestSigner::sign`]
#[derive(Debug, Clone, PartialEq)]
pub struct SignedPayload {
    /// Parameters after timestamp injection
    pub params: RequestParams,
    /// Exact bytes that were signed (canonical JSON)
    pub payload: String,
    /// Lowercase hex signature
    pub signature: String,
}

/// Request signer for building authenticated requests
///
/// Captures the timestamp once at construction so the value that is signed
/// is the value that is sent.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: Option<u64>,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    ///
    /// When `requires_timestamp` is set, the current time is injected into
    /// every payload signed by this signer.
    pub fn new(credentials: &'a Credentials, requires_timestamp: bool) -> Self {
        Self {
            credentials,
            timestamp: requires_timestamp.then(current_timestamp_millis),
        }
    }

    /// Override the injected timestamp
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Timestamp that will be injected, if any
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Inject the timestamp (if any), serialize and sign the parameters
    pub fn sign(&self, mut params: RequestParams) -> AuthResult<SignedPayload> {
        if let Some(timestamp) = self.timestamp {
            params.insert(TIMESTAMP_PARAM, timestamp);
        }

        let payload = params.to_canonical_json()?;
        let signature = self.credentials.sign(&payload);

        Ok(SignedPayload {
            params,
            payload,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_known_vector() {
        let digest = hmac_sha256_hex(b"key", b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            digest,
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key", "super_secret_value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super_secret_value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api"));
    }

    #[test]
    fn test_signing_is_lowercase_hex() {
        let creds = Credentials::new("key", "secret");
        let signature = creds.sign(r#"{"timestamp":1616492376594}"#);
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signer_injects_timestamp() {
        let creds = Credentials::new("key", "secret");
        let signed = RequestSigner::new(&creds, true)
            .with_timestamp(1616492376594)
            .sign(RequestParams::new())
            .unwrap();

        assert_eq!(signed.payload, r#"{"timestamp":1616492376594}"#);
        assert_eq!(signed.signature, creds.sign(&signed.payload));
    }

    #[test]
    fn test_signer_without_timestamp() {
        let creds = Credentials::new("key", "secret");
        let signer = RequestSigner::new(&creds, false);
        assert_eq!(signer.timestamp(), None);

        let signed = signer.sign(RequestParams::new().with("pair", "B-BTC_USDT")).unwrap();
        assert!(!signed.params.contains_key(TIMESTAMP_PARAM));
        assert_eq!(signed.payload, r#"{"pair":"B-BTC_USDT"}"#);
    }

    #[test]
    fn test_signer_captures_current_time() {
        let before = current_timestamp_millis();
        let creds = Credentials::new("key", "secret");
        let signer = RequestSigner::new(&creds, true);
        let after = current_timestamp_millis();

        let timestamp = signer.timestamp().unwrap();
        assert!(timestamp >= before && timestamp <= after);
    }

    #[test]
    fn test_signature_is_deterministic() {
        let creds = Credentials::new("key", "secret");
        let params = RequestParams::new().with("market", "BTCINR").with("limit", 10);

        let first = RequestSigner::new(&creds, true)
            .with_timestamp(42)
            .sign(params.clone())
            .unwrap();
        let second = RequestSigner::new(&creds, true)
            .with_timestamp(42)
            .sign(params)
            .unwrap();

        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn test_signature_changes_with_values_and_order() {
        let creds = Credentials::new("key", "secret");
        let sign = |params: RequestParams| {
            RequestSigner::new(&creds, true)
                .with_timestamp(42)
                .sign(params)
                .unwrap()
                .signature
        };

        let base = sign(RequestParams::new().with("market", "BTCINR").with("limit", 10));
        let other_value = sign(RequestParams::new().with("market", "BTCINR").with("limit", 11));
        let other_order = sign(RequestParams::new().with("limit", 10).with("market", "BTCINR"));
        let other_timestamp = RequestSigner::new(&creds, true)
            .with_timestamp(43)
            .sign(RequestParams::new().with("market", "BTCINR").with("limit", 10))
            .unwrap()
            .signature;

        assert_ne!(base, other_value);
        assert_ne!(base, other_order);
        assert_ne!(base, other_timestamp);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let payload = r#"{"timestamp":1}"#;
        let a = Credentials::new("key", "secret-a").sign(payload);
        let b = Credentials::new("key", "secret-b").sign(payload);
        assert_ne!(a, b);
    }
}

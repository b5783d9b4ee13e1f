//! Credentials and request signing for the CoinDCX REST API
//!
//! Private CoinDCX endpoints authenticate every call with two headers:
//! `X-AUTH-APIKEY` carrying the API key and `X-AUTH-SIGNATURE` carrying the
//! lowercase hex HMAC-SHA256 of the JSON body, keyed by the API secret.
//!
//! # Example
//!
//! ```
//! use coindcx_auth::{Credentials, RequestParams, RequestSigner};
//!
//! let creds = Credentials::new("my-key", "my-secret");
//! let signed = RequestSigner::new(&creds, true)
//!     .with_timestamp(1_700_000_000_000)
//!     .sign(RequestParams::new())
//!     .unwrap();
//!
//! assert_eq!(signed.payload, r#"{"timestamp":1700000000000}"#);
//! ```

mod credentials;
mod error;
mod params;

pub use credentials::{
    current_timestamp_millis, hmac_sha256_hex, Credentials, RequestSigner, SignedPayload,
    API_KEY_ENV, API_SECRET_ENV, TIMESTAMP_PARAM,
};
pub use error::{AuthError, AuthResult};
pub use params::RequestParams;

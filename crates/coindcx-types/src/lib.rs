//! Shared types for the CoinDCX REST API
//!
//! This crate holds the normalized result shape returned by every CoinDCX
//! call. It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`ApiResult`] - `Result` of a call, carrying the JSON payload on success
//! - [`Failure`] - Structured failure record (`code`, `kind`, `message`)
//! - [`ErrorKind`] - Failure taxonomy
//! - [`RecoveryStrategy`] - Suggested reaction to a failure

pub mod error_codes;
pub mod result;

pub use error_codes::*;
pub use result::*;

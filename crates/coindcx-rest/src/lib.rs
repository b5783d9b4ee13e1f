//! REST API client for the CoinDCX cryptocurrency exchange
//!
//! This crate provides a REST client for CoinDCX market data and account
//! queries.
//!
//! # Features
//!
//! - **Market Data**: Ticker, markets, market details, trades, order book, candles
//! - **Account**: Profile, balances, trade history, active orders
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with a
//! hex HMAC-SHA256 of the JSON body, keyed by the API secret.
//!
//! # Results
//!
//! Every endpoint returns an [`ApiResult`]: the decoded JSON payload on
//! success, or a [`Failure`] with a stable `code`, an [`ErrorKind`] and a
//! message. Typed models in [`types`] can be decoded from the payload with
//! [`ApiResultExt::decode`].
//!
//! # Example
//!
//! ```no_run
//! use coindcx_rest::{ApiResultExt, CoinDcxClient, Credentials};
//! use coindcx_rest::types::{Balance, Ticker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoinDcxClient::new()?;
//!     let tickers: Vec<Ticker> = client.ticker().await.decode()?;
//!     println!("{} markets", tickers.len());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CoinDcxClient::with_credentials(creds)?;
//!     let balances: Vec<Balance> = auth_client.balances().await.decode()?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod normalizer;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::CoinDcxClient;
pub use config::ClientConfig;
pub use error::{RestError, RestResult};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

// Re-export shared types
pub use coindcx_auth::{Credentials, RequestParams};
pub use coindcx_types::error_codes;
pub use coindcx_types::{ApiResult, ApiResultExt, ErrorKind, Failure, RecoveryStrategy};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    Candle, CandleInterval, MarketDetail, MarketTrade, OrderBook, Ticker,
    // Account
    ActiveOrders, Balance, Order, UserInfo, UserTrade,
};

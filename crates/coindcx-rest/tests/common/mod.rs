//! Common test utilities and fixtures for integration tests
//!
//! Contains sample payloads in the shape CoinDCX returns them

#![allow(dead_code)]

use coindcx_rest::{ClientConfig, CoinDcxClient, Credentials};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";

/// Sample ticker response
pub const TICKER_RESPONSE: &str = r#"[
    {
        "market": "BTCINR",
        "change_24_hour": "-1.621",
        "high": "5910000",
        "low": "5700000",
        "volume": "12.3",
        "last_price": "5800000.00",
        "bid": 5799000,
        "ask": 5801000,
        "timestamp": 1700000000
    }
]"#;

/// Sample markets details response
pub const MARKETS_DETAILS_RESPONSE: &str = r#"[
    {
        "coindcx_name": "BTCUSDT",
        "base_currency_short_name": "USDT",
        "target_currency_short_name": "BTC",
        "target_currency_name": "Bitcoin",
        "base_currency_name": "Tether",
        "min_quantity": 0.0001,
        "max_quantity": 1000,
        "min_price": 5000,
        "max_price": 150000,
        "min_notional": 10,
        "base_currency_precision": 2,
        "target_currency_precision": 4,
        "step": 0.0001,
        "order_types": ["market_order", "limit_order"],
        "symbol": "BTCUSDT",
        "ecode": "B",
        "max_leverage": 5,
        "pair": "B-BTC_USDT",
        "status": "active"
    }
]"#;

/// Sample market trade history response
pub const MARKET_TRADES_RESPONSE: &str = r#"[
    {"p": 37000.5, "q": 0.012, "s": "BTCUSDT", "T": 1700000000123, "m": true},
    {"p": 36999.0, "q": 0.5, "s": "BTCUSDT", "T": 1700000000001, "m": false}
]"#;

/// Sample order book response
pub const ORDER_BOOK_RESPONSE: &str = r#"{
    "bids": {"36999.00": "0.5", "37000.00": "1.25"},
    "asks": {"37002.00": "0.75", "37001.00": "0.10"}
}"#;

/// Sample balances response
pub const BALANCES_RESPONSE: &str = r#"[
    {"currency": "BTC", "balance": 1.25, "locked_balance": 0.25},
    {"currency": "INR", "balance": "1000.5", "locked_balance": "0"}
]"#;

/// Sample active orders response
pub const ACTIVE_ORDERS_RESPONSE: &str = r#"{
    "orders": [
        {
            "id": "ead19992-43fd-11e8-b027-bb815bcb14ed",
            "market": "TRXETH",
            "order_type": "limit_order",
            "side": "buy",
            "status": "open",
            "fee_amount": 0.0000008,
            "fee": 0.1,
            "total_quantity": 2,
            "remaining_quantity": 1.5,
            "avg_price": 0,
            "price_per_unit": 0.00001567,
            "created_at": "2018-04-19T18:17:28.022Z",
            "updated_at": "2018-04-19T18:17:28.022Z"
        }
    ]
}"#;

/// Error body CoinDCX sends for a rejected signature
pub const INVALID_CREDENTIALS_RESPONSE: &str =
    r#"{"code":401,"message":"Invalid credentials","status":"error"}"#;

/// Error body for an unknown resource
pub const NOT_FOUND_RESPONSE: &str = r#"{"code":404,"message":"Not Found","status":"error"}"#;

/// Client with both roots pointed at the mock server
pub fn public_client(server: &MockServer) -> CoinDcxClient {
    CoinDcxClient::with_config(ClientConfig::new().with_base_url(server.uri()))
        .expect("client should build")
}

/// Authenticated client with both roots pointed at the mock server
pub fn private_client(server: &MockServer) -> CoinDcxClient {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_credentials(Credentials::new(API_KEY, API_SECRET));

    CoinDcxClient::with_config(config).expect("client should build")
}

/// Recompute the signature CoinDCX expects for a body
pub fn expected_signature(body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(API_SECRET.as_bytes()).expect("any key size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

//! API endpoint descriptors and implementations

pub mod account;
pub mod market;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;

use std::fmt;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Root URL an endpoint is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUrl {
    /// General API root (`https://api.coindcx.com/`)
    Api,
    /// Public market-data root (`https://public.coindcx.com/`)
    Public,
}

/// Static description of a CoinDCX endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path relative to the root, without a leading slash
    pub path: &'static str,
    /// Root URL the path is appended to
    pub base: BaseUrl,
    /// Whether the request must be signed
    pub requires_auth: bool,
    /// Whether a `timestamp` is injected before signing
    pub requires_timestamp: bool,
    /// HTTP method
    pub method: HttpMethod,
}

impl Endpoint {
    pub(crate) const fn public(path: &'static str, base: BaseUrl) -> Self {
        Self {
            path,
            base,
            requires_auth: false,
            requires_timestamp: !is_timestamp_exempt(path),
            method: HttpMethod::Get,
        }
    }

    pub(crate) const fn private(path: &'static str) -> Self {
        Self {
            path,
            base: BaseUrl::Api,
            requires_auth: true,
            requires_timestamp: !is_timestamp_exempt(path),
            method: HttpMethod::Post,
        }
    }

    /// Check if the endpoint can be called without credentials
    pub fn is_public(&self) -> bool {
        !self.requires_auth
    }
}

/// Paths that never get a `timestamp` injected
pub const NO_TIMESTAMP_PATHS: [&str; 6] = [
    "exchange/ticker",
    "exchange/v1/markets",
    "exchange/v1/markets_details",
    "market_data/trade_history",
    "market_data/orderbook",
    "market_data/candles",
];

/// Check if `path` is one of [`NO_TIMESTAMP_PATHS`]
pub const fn is_timestamp_exempt(path: &str) -> bool {
    let mut i = 0;
    while i < NO_TIMESTAMP_PATHS.len() {
        if str_eq(NO_TIMESTAMP_PATHS[i], path) {
            return true;
        }
        i += 1;
    }
    false
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

// Public market data

pub const TICKER: Endpoint = Endpoint::public("exchange/ticker", BaseUrl::Api);
pub const MARKETS: Endpoint = Endpoint::public("exchange/v1/markets", BaseUrl::Api);
pub const MARKETS_DETAILS: Endpoint =
    Endpoint::public("exchange/v1/markets_details", BaseUrl::Api);
pub const MARKET_TRADES: Endpoint =
    Endpoint::public("market_data/trade_history", BaseUrl::Public);
pub const ORDER_BOOK: Endpoint = Endpoint::public("market_data/orderbook", BaseUrl::Public);
pub const CANDLES: Endpoint = Endpoint::public("market_data/candles", BaseUrl::Public);

// Private account data

pub const ACCOUNT_INFO: Endpoint = Endpoint::private("exchange/v1/users/info");
pub const BALANCES: Endpoint = Endpoint::private("exchange/v1/users/balances");
pub const TRADE_HISTORY: Endpoint = Endpoint::private("exchange/v1/orders/trade_history");
pub const ACTIVE_ORDERS: Endpoint = Endpoint::private("exchange/v1/orders/active_orders");

/// Every supported endpoint
pub const ALL: [Endpoint; 10] = [
    TICKER,
    MARKETS,
    MARKETS_DETAILS,
    MARKET_TRADES,
    ORDER_BOOK,
    CANDLES,
    ACCOUNT_INFO,
    BALANCES,
    TRADE_HISTORY,
    ACTIVE_ORDERS,
];

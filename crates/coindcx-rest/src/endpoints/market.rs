//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use coindcx_auth::RequestParams;
use coindcx_types::ApiResult;
use tracing::instrument;

use super::{CANDLES, MARKETS, MARKETS_DETAILS, MARKET_TRADES, ORDER_BOOK, TICKER};
use crate::client::CoinDcxClient;
use crate::transport::HttpTransport;
use crate::types::CandleInterval;

/// Number of trades returned when no limit is given
pub const DEFAULT_TRADES_LIMIT: u16 = 30;

/// Public market data endpoints
pub struct MarketEndpoints<'a, T> {
    client: &'a CoinDcxClient<T>,
}

impl<'a, T: HttpTransport> MarketEndpoints<'a, T> {
    pub fn new(client: &'a CoinDcxClient<T>) -> Self {
        Self { client }
    }

    /// Get tickers for every market
    #[instrument(skip(self))]
    pub async fn ticker(&self) -> ApiResult {
        self.client.execute(&TICKER, RequestParams::new()).await
    }

    /// Get the list of market symbols
    #[instrument(skip(self))]
    pub async fn markets(&self) -> ApiResult {
        self.client.execute(&MARKETS, RequestParams::new()).await
    }

    /// Get trading rules for every market
    #[instrument(skip(self))]
    pub async fn markets_details(&self) -> ApiResult {
        self.client.execute(&MARKETS_DETAILS, RequestParams::new()).await
    }

    /// Get the most recent public trades
    ///
    /// # Arguments
    /// * `pair` - Pair from the markets details endpoint (e.g., "B-BTC_USDT")
    /// * `limit` - Number of trades (default 30, sent as given)
    #[instrument(skip(self))]
    pub async fn market_trades(&self, pair: &str, limit: Option<u16>) -> ApiResult {
        self.client
            .execute(&MARKET_TRADES, market_trades_params(pair, limit))
            .await
    }

    /// Get bids and asks for a pair
    #[instrument(skip(self))]
    pub async fn order_book(&self, pair: &str) -> ApiResult {
        self.client
            .execute(&ORDER_BOOK, order_book_params(pair))
            .await
    }

    /// Get candles for a pair, newest first
    ///
    /// # Arguments
    /// * `pair` - Pair from the markets details endpoint
    /// * `interval` - Candle interval (default 5m)
    /// * `start_time` / `end_time` - Range bounds in milliseconds (optional)
    #[instrument(skip(self))]
    pub async fn candles(
        &self,
        pair: &str,
        interval: Option<CandleInterval>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> ApiResult {
        self.client
            .execute(&CANDLES, candles_params(pair, interval, start_time, end_time))
            .await
    }
}

/// Parameters for the market trades endpoint
pub fn market_trades_params(pair: &str, limit: Option<u16>) -> RequestParams {
    RequestParams::new()
        .with("pair", pair)
        .with("limit", limit.unwrap_or(DEFAULT_TRADES_LIMIT))
}

/// Parameters for the order book endpoint
pub fn order_book_params(pair: &str) -> RequestParams {
    RequestParams::new().with("pair", pair)
}

/// Parameters for the candles endpoint
pub fn candles_params(
    pair: &str,
    interval: Option<CandleInterval>,
    start_time: Option<u64>,
    end_time: Option<u64>,
) -> RequestParams {
    RequestParams::new()
        .with("pair", pair)
        .with("interval", interval.unwrap_or_default().as_str())
        .with_opt("startTime", start_time)
        .with_opt("endTime", end_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_trades_default_limit() {
        let params = market_trades_params("BTCINR", None);
        assert_eq!(params.to_query_string().unwrap(), "pair=BTCINR&limit=30");
    }

    #[test]
    fn test_market_trades_limit_is_passed_through() {
        // The exchange rejects limits above 500 itself
        let params = market_trades_params("BTCINR", Some(1000));
        assert_eq!(params.get("limit"), Some(&1000.into()));

        let params = market_trades_params("BTCINR", Some(100));
        assert_eq!(params.get("limit"), Some(&100.into()));
    }

    #[test]
    fn test_candles_default_interval() {
        let params = candles_params("BTCINR", None, None, None);
        assert_eq!(params.to_query_string().unwrap(), "pair=BTCINR&interval=5m");
    }

    #[test]
    fn test_candles_with_range() {
        let params = candles_params(
            "B-BTC_USDT",
            Some(CandleInterval::OneHour),
            Some(1_700_000_000_000),
            Some(1_700_003_600_000),
        );
        assert_eq!(
            params.to_query_string().unwrap(),
            "pair=B-BTC_USDT&interval=1h&startTime=1700000000000&endTime=1700003600000"
        );
    }

    #[test]
    fn test_candles_end_only() {
        let params = candles_params("B-BTC_USDT", None, None, Some(5));
        assert!(!params.contains_key("startTime"));
        assert_eq!(params.keys().collect::<Vec<_>>(), ["pair", "interval", "endTime"]);
    }
}

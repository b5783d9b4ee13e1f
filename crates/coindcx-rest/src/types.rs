//! Types for CoinDCX REST API requests and responses
//!
//! Endpoint methods return the raw JSON payload. These models can be decoded
//! from it with [`coindcx_types::ApiResultExt::decode`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RestError;

// ============================================================================
// Request Types
// ============================================================================

/// Candle interval accepted by the candles endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CandleInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[default]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl CandleInterval {
    pub const ALL: [Self; 13] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::FourHours,
        Self::SixHours,
        Self::EightHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
        Self::OneMonth,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::TwoHours => "2h",
            Self::FourHours => "4h",
            Self::SixHours => "6h",
            Self::EightHours => "8h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1M",
        }
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleInterval {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| RestError::InvalidParameter(format!("unknown candle interval: {}", s)))
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Ticker entry for one market
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Market symbol (e.g., "BTCINR")
    pub market: String,
    /// 24 hour change in percent
    pub change_24_hour: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    /// Unix timestamp in seconds
    pub timestamp: Option<u64>,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.bid? + self.ask?) / Decimal::TWO)
    }

    /// Get the spread (ask - bid)
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask? - self.bid?)
    }
}

/// Trading rules for one market
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDetail {
    pub coindcx_name: String,
    pub base_currency_short_name: String,
    pub target_currency_short_name: String,
    pub base_currency_name: Option<String>,
    pub target_currency_name: Option<String>,
    pub min_quantity: Option<Decimal>,
    pub max_quantity: Option<Decimal>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_notional: Option<Decimal>,
    pub base_currency_precision: Option<u32>,
    pub target_currency_precision: Option<u32>,
    pub step: Option<Decimal>,
    #[serde(default)]
    pub order_types: Vec<String>,
    pub symbol: String,
    /// Exchange code (e.g., "B", "I")
    pub ecode: String,
    /// Pair identifier used by market data endpoints (e.g., "B-BTC_USDT")
    pub pair: String,
    pub status: String,
    pub max_leverage: Option<Decimal>,
}

impl MarketDetail {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Public trade from the market trade history
#[derive(Debug, Clone, Deserialize)]
pub struct MarketTrade {
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub quantity: Decimal,
    #[serde(rename = "s")]
    pub symbol: String,
    /// Unix timestamp in milliseconds
    #[serde(rename = "T")]
    pub timestamp: u64,
    /// Whether the buyer was the maker
    #[serde(rename = "m")]
    pub buyer_is_maker: bool,
}

/// Order book snapshot (price -> quantity, both as sent)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub bids: BTreeMap<String, String>,
    #[serde(default)]
    pub asks: BTreeMap<String, String>,
}

impl OrderBook {
    /// Bid levels sorted best (highest) first; unparsable levels are skipped
    pub fn bid_levels(&self) -> Vec<(Decimal, Decimal)> {
        let mut levels = parse_levels(&self.bids);
        levels.sort_by(|a, b| b.0.cmp(&a.0));
        levels
    }

    /// Ask levels sorted best (lowest) first; unparsable levels are skipped
    pub fn ask_levels(&self) -> Vec<(Decimal, Decimal)> {
        let mut levels = parse_levels(&self.asks);
        levels.sort_by(|a, b| a.0.cmp(&b.0));
        levels
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bid_levels().first().map(|(price, _)| *price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.ask_levels().first().map(|(price, _)| *price)
    }
}

fn parse_levels(side: &BTreeMap<String, String>) -> Vec<(Decimal, Decimal)> {
    side.iter()
        .filter_map(|(price, qty)| Some((price.parse().ok()?, qty.parse().ok()?)))
        .collect()
}

/// OHLCV candle
#[derive(Debug, Clone, Deserialize)]
pub struct Candle {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Candle open time in milliseconds
    pub time: u64,
}

// ============================================================================
// Account Types
// ============================================================================

/// Account profile
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub coindcx_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
}

/// Balance of one currency
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub currency: String,
    /// Available balance
    pub balance: Decimal,
    /// Balance reserved by open orders
    #[serde(default)]
    pub locked_balance: Decimal,
}

impl Balance {
    /// Available plus locked
    pub fn total(&self) -> Decimal {
        self.balance + self.locked_balance
    }
}

/// Trade from the account trade history
#[derive(Debug, Clone, Deserialize)]
pub struct UserTrade {
    pub id: u64,
    pub order_id: String,
    pub side: String,
    pub fee_amount: Option<Decimal>,
    pub ecode: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
    pub symbol: String,
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
}

/// Active orders wrapper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveOrders {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Open order
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    pub market: String,
    pub order_type: String,
    pub side: String,
    pub status: String,
    pub fee_amount: Option<Decimal>,
    pub fee: Option<Decimal>,
    pub total_quantity: Decimal,
    pub remaining_quantity: Decimal,
    pub avg_price: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Order {
    pub fn filled_quantity(&self) -> Decimal {
        self.total_quantity - self.remaining_quantity
    }
}

//! Demo 1: Market Snapshot
//!
//! Showcases: public endpoints, typed decoding, normalized failures
//!
//! Run: cargo run --bin market_snapshot -- B-BTC_USDT

use coindcx_rest::types::{MarketDetail, MarketTrade, OrderBook, Ticker};
use coindcx_rest::{ApiResultExt, CandleInterval, CoinDcxClient, Failure};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pair = std::env::args().nth(1).unwrap_or_else(|| "B-BTC_USDT".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINDCX MARKET SNAPSHOT".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CoinDcxClient::from_env()?;

    // Market rules for the pair
    let details: Vec<MarketDetail> = client.markets_details().await.decode()?;
    let Some(detail) = details.iter().find(|d| d.pair == pair) else {
        println!("{} Unknown pair {}", "✗".red(), pair);
        return Ok(());
    };
    println!(
        "{} {} ({}), status {}",
        "✓".green(),
        detail.symbol.bold(),
        detail.pair,
        detail.status
    );

    // Ticker for the matching market
    match client.ticker().await.decode::<Vec<Ticker>>() {
        Ok(tickers) => {
            if let Some(ticker) = tickers.iter().find(|t| t.market == detail.symbol) {
                println!(
                    "  {} {:?}  {} {:?}  {} {:?}",
                    "LAST:".yellow(),
                    ticker.last_price,
                    "BID:".yellow(),
                    ticker.bid,
                    "ASK:".yellow(),
                    ticker.ask
                );
            }
        }
        Err(failure) => report(&failure),
    }

    // Top of book
    match client.order_book(&pair).await.decode::<OrderBook>() {
        Ok(book) => {
            println!("\n  {}", "Order Book".bold());
            for (price, qty) in book.ask_levels().iter().take(5).rev() {
                println!("    {} {:>14} {:>14}", "ASK".red(), price, qty);
            }
            for (price, qty) in book.bid_levels().iter().take(5) {
                println!("    {} {:>14} {:>14}", "BID".green(), price, qty);
            }
        }
        Err(failure) => report(&failure),
    }

    // Recent trades
    match client.market_trades(&pair, Some(10)).await.decode::<Vec<MarketTrade>>() {
        Ok(trades) => {
            println!("\n  {}", "Recent Trades".bold());
            for trade in trades {
                let side = if trade.buyer_is_maker { "SELL".red() } else { "BUY".green() };
                println!("    {} {:>14} x {}", side, trade.price, trade.quantity);
            }
        }
        Err(failure) => report(&failure),
    }

    // Last few hourly candles
    match client.candles(&pair, Some(CandleInterval::OneHour), None, None).await {
        Ok(candles) => {
            let count = candles.as_array().map(Vec::len).unwrap_or(0);
            println!("\n  {} hourly candles received", count);
        }
        Err(failure) => report(&failure),
    }

    println!("\n{} Snapshot complete.", "✓".green());
    Ok(())
}

fn report(failure: &Failure) {
    println!("  {} [{}] {}: {}", "✗".red(), failure.code, failure.kind, failure.message);
}

//! Demo 2: Account Overview
//!
//! Showcases: signed private endpoints, credential loading from the environment
//!
//! Run: COINDCX_KEY=... COINDCX_SECRET=... cargo run --bin account_overview

use coindcx_rest::types::{ActiveOrders, Balance};
use coindcx_rest::{ApiResultExt, CoinDcxClient, ErrorKind, Failure};
use colored::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINDCX ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CoinDcxClient::from_env()?;
    if !client.has_credentials() {
        println!("{} Set COINDCX_KEY and COINDCX_SECRET to run this demo", "✗".red());
        return Ok(());
    }

    match client.account_info().await {
        Ok(info) => println!("{} Signed in as {}", "✓".green(), info["email"]),
        Err(failure) if failure.kind == ErrorKind::InvalidCredentials => {
            println!("{} {}", "✗".red(), failure.message);
            return Ok(());
        }
        Err(failure) => report(&failure),
    }

    match client.balances().await.decode::<Vec<Balance>>() {
        Ok(balances) => {
            println!("\n  {}", "Balances".bold());
            for balance in balances.iter().filter(|b| b.total() > Decimal::ZERO) {
                println!(
                    "    {:<8} {:>18} {} {}",
                    balance.currency,
                    balance.balance,
                    "locked".dimmed(),
                    balance.locked_balance
                );
            }
        }
        Err(failure) => report(&failure),
    }

    match client.active_orders().await.decode::<ActiveOrders>() {
        Ok(active) => {
            println!("\n  {} ({})", "Active Orders".bold(), active.orders.len());
            for order in &active.orders {
                println!(
                    "    {} {} {} filled {}/{}",
                    order.side.to_uppercase(),
                    order.market,
                    order.order_type,
                    order.filled_quantity(),
                    order.total_quantity
                );
            }
        }
        Err(failure) => report(&failure),
    }

    match client.trade_history().await {
        Ok(trades) => {
            let count = trades.as_array().map(Vec::len).unwrap_or(0);
            println!("\n  {} trades in history", count);
        }
        Err(failure) => report(&failure),
    }

    Ok(())
}

fn report(failure: &Failure) {
    println!("  {} [{}] {}: {}", "✗".red(), failure.code, failure.kind, failure.message);
}

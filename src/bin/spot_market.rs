//! Spot market query tool - fetches records from the indexer and prints them.
//!
//! Endpoint and token list come from `SPOT_MARKET_*` environment variables
//! (or `.env`), see [`spot_market_sdk::config::EnvConfig`].

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use spot_market_sdk::{
    client::{MarketDataClient, OrdersQuery},
    config::EnvConfig,
    types::{self, Order, OrderType},
};
use tracing::error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Buy,
    Sell,
}

#[derive(Parser, Debug)]
#[command(name = "spot_market")]
#[command(about = "Query spot market orders, trades and listings from the indexer")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recent orders of a market
    Orders {
        /// Asset ID of the market base token
        #[arg(short, long)]
        base_token: String,

        /// Maximum number of orders
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only orders of this side
        #[arg(short, long, value_enum)]
        side: Option<Side>,

        /// Only orders of this trader
        #[arg(short, long)]
        trader: Option<String>,
    },
    /// Recent trades of a market
    Trades {
        /// Asset ID of the market base token
        #[arg(short, long)]
        base_token: String,

        /// Maximum number of trades
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
    /// Listed markets
    Markets {
        /// Maximum number of markets
        #[arg(short, long, default_value = "100")]
        limit: i64,
    },
    /// Last trade price and number of recent trades of a market
    Summary {
        /// Asset ID of the market base token
        #[arg(short, long)]
        base_token: String,
    },
}

fn print_order(order: &Order) {
    println!(
        "{} │ {:<10} │ {:<4} │ size: {:<16} │ price: {:<14} │ total: {:<14} │ {}",
        order.timestamp().format("%Y-%m-%d %H:%M:%S"),
        order.market_symbol(),
        order.r#type(),
        format!("{}", order.base_size_units()),
        format!("{}", order.price_units()),
        format!("{}", order.quote_size_units()),
        order.trader(),
    );
}

fn display_price(price: Option<fastnum::UD128>) -> String {
    price.map_or_else(|| "?".to_string(), |p| p.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let args = Args::parse();

    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = match env_config.token_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to load token list: {}", e);
            exit(1);
        }
    };

    let client = match MarketDataClient::connect(&env_config.indexer(), registry) {
        Ok(client) => client,
        Err(e) => {
            error!(%e, "Failed to create indexer client");
            exit(1);
        }
    };

    match args.command {
        Command::Orders {
            base_token,
            limit,
            side,
            trader,
        } => {
            let mut query = OrdersQuery::new(base_token, limit);
            if let Some(side) = side {
                query = query.with_type(match side {
                    Side::Buy => OrderType::Buy,
                    Side::Sell => OrderType::Sell,
                });
            }
            if let Some(trader) = trader {
                query = query.with_trader(trader);
            }
            let orders = client.fetch_orders(&query).await;
            println!("{} order(s)", orders.len());
            orders.iter().for_each(print_order);
        }
        Command::Trades { base_token, limit } => {
            let trades = client.fetch_trades(&base_token, limit).await;
            println!("{} trade(s)", trades.len());
            for trade in &trades {
                println!(
                    "{} │ {} │ amount: {} @ {} │ matcher: {}",
                    trade.timestamp,
                    trade.id,
                    trade.trade_amount,
                    display_price(trade.price_units()),
                    trade.matcher,
                );
            }
        }
        Command::Markets { limit } => {
            let markets = client.fetch_market_create_events(limit).await;
            println!("{} market(s)", markets.len());
            for market in &markets {
                let symbol = client
                    .registry()
                    .by_asset_id(&market.asset_id)
                    .map(|t| t.symbol.as_str())
                    .unwrap_or("?");
                println!(
                    "{:<6} │ {} │ decimals: {}",
                    symbol, market.asset_id, market.decimal
                );
            }
        }
        Command::Summary { base_token } => {
            let (price, trades) = futures::join!(
                client.fetch_market_price(&base_token),
                client.fetch_trades(&base_token, 100),
            );
            println!("Last price: {}", display_price(types::price_units(price)));
            println!("Trades in last page: {}", trades.len());
        }
    }
}

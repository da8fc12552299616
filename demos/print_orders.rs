//! Example: Print the latest sell orders of a market from the testnet indexer.
//!
//! Run with: cargo run --example print_orders -- <base token asset id> <decimals>

use spot_market_sdk::{
    Indexer,
    client::{MarketDataClient, OrdersQuery},
    types::{OrderType, Token, TokenRegistry},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let base_token = args.next().ok_or("base token asset id expected")?;
    let decimals: u8 = args.next().ok_or("base token decimals expected")?.parse()?;

    let registry = TokenRegistry::new([
        Token::new("USDC", 6, "usdc"),
        Token::new("BASE", decimals, base_token.clone()),
    ]);
    let client = MarketDataClient::connect(&Indexer::arbitrum_sepolia(), registry)?;

    let orders = client
        .try_fetch_orders(&OrdersQuery::new(base_token, 10).with_type(OrderType::Sell))
        .await?;

    println!("{} sell order(s):", orders.len());
    for order in &orders {
        println!(
            "  {} {} {} @ {} = {} USDC",
            order.timestamp(),
            order.trader(),
            order.base_size_units(),
            order.price_units(),
            order.quote_size_units(),
        );
    }

    Ok(())
}

mod event;
mod order;
mod token;
mod trade;

pub use event::MarketCreateEvent;
pub use order::{Order, OrderType};
pub use token::{QUOTE_SYMBOL, Token, TokenRegistry};
pub use trade::Trade;

/// Asset ID of a token as reported by the indexer (hex string).
pub type AssetId = String;

/// Indexer record ID.
pub type RecordId = String;

/// Number of decimal places of raw order prices.
pub const PRICE_DECIMALS: u8 = 9;

/// Converts a raw price into quote token per base token,
/// `None` if it does not fit into [`fastnum::UD128`].
pub fn price_units(price: alloy::primitives::U256) -> Option<fastnum::UD128> {
    crate::num::Converter::new(PRICE_DECIMALS).from_unsigned(price)
}

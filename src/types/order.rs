use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use fastnum::UD128;

use super::{PRICE_DECIMALS, RecordId, Token, TokenRegistry, price_units};
use crate::{client::raw::RawOrder, error::MapError, num};

/// Direction of the order, derived from the sign of the raw base size.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    /// Negative base size is a sell, anything else a buy.
    pub fn from_sign(is_negative: bool) -> Self {
        if is_negative {
            OrderType::Sell
        } else {
            OrderType::Buy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "BUY",
            OrderType::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spot market order reported by the indexer.
///
/// Raw amounts are kept alongside their decimal representation:
/// * base size in base token units, always non-negative, direction is
///   carried by [`Order::r#type`];
/// * price with [`PRICE_DECIMALS`] decimal places, in quote token per
///   base token;
/// * quote size derived as `base_size * price * 10^quote_decimals /
///   (10^base_decimals * 10^PRICE_DECIMALS)`, in quote token units.
#[derive(Clone, derive_more::Debug)]
pub struct Order {
    id: RecordId,
    timestamp: DateTime<Utc>,
    base_token: Token,
    quote_token: Token,
    trader: String,
    r#type: OrderType,
    base_size: U256,
    #[debug("{base_size_units}")]
    base_size_units: UD128,
    quote_size: U256,
    #[debug("{quote_size_units}")]
    quote_size_units: UD128,
    price: U256,
    #[debug("{price_units}")]
    price_units: UD128,
}

impl Order {
    /// Converts a raw indexer row, resolving tokens via the registry.
    pub fn new(raw: &RawOrder, registry: &TokenRegistry) -> Result<Self, MapError> {
        let base_token = registry
            .by_asset_id(&raw.base_token)
            .ok_or_else(|| MapError::UnknownToken(raw.base_token.clone()))?;
        let quote_token = registry
            .quote_token()
            .ok_or(MapError::MissingQuoteToken(super::QUOTE_SYMBOL))?;

        let (is_negative, base_size) = num::split_sign(raw.base_size.to_signed("baseSize")?);
        let price = raw.order_price.to_unsigned("orderPrice")?;
        let block_timestamp = raw.block_timestamp.to_u64("blockTimestamp")?;
        let timestamp = i64::try_from(block_timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(MapError::InvalidTimestamp(block_timestamp))?;

        let base_converter = base_token.converter();
        let quote_converter = quote_token.converter();
        let price_scale = num::Converter::new(PRICE_DECIMALS).scale();

        let quote_size = num::mul_mul_div(
            base_size,
            price,
            quote_converter.scale(),
            base_converter
                .scale()
                .checked_mul(price_scale)
                .ok_or(MapError::Overflow("baseSize"))?,
        )
        .ok_or(MapError::Overflow("quoteSize"))?;

        Ok(Self {
            id: raw.id.clone(),
            timestamp,
            base_token: base_token.clone(),
            quote_token: quote_token.clone(),
            trader: raw.trader.clone(),
            r#type: OrderType::from_sign(is_negative),
            base_size,
            base_size_units: base_converter
                .from_unsigned(base_size)
                .ok_or(MapError::Overflow("baseSize"))?,
            quote_size,
            quote_size_units: quote_converter
                .from_unsigned(quote_size)
                .ok_or(MapError::Overflow("quoteSize"))?,
            price,
            price_units: price_units(price).ok_or(MapError::Overflow("orderPrice"))?,
        })
    }

    /// Indexer ID of the order.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Timestamp of the block the order was placed in.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn base_token(&self) -> &Token {
        &self.base_token
    }

    pub fn quote_token(&self) -> &Token {
        &self.quote_token
    }

    /// Address of the trader placed the order.
    pub fn trader(&self) -> &str {
        &self.trader
    }

    pub fn r#type(&self) -> OrderType {
        self.r#type
    }

    /// Absolute base size in raw base token units.
    pub fn base_size(&self) -> U256 {
        self.base_size
    }

    pub fn base_size_units(&self) -> UD128 {
        self.base_size_units
    }

    /// Quote size in raw quote token units, rounded down.
    pub fn quote_size(&self) -> U256 {
        self.quote_size
    }

    /// Quote size in quote token units, derived from the rounded down
    /// [`Self::quote_size`], so fractions of a raw quote unit are dropped.
    pub fn quote_size_units(&self) -> UD128 {
        self.quote_size_units
    }

    /// Limit price with [`PRICE_DECIMALS`] decimal places.
    pub fn price(&self) -> U256 {
        self.price
    }

    pub fn price_units(&self) -> UD128 {
        self.price_units
    }

    /// Market symbol, e.g. `BTC-USDC`.
    pub fn market_symbol(&self) -> String {
        format!("{}-{}", self.base_token.symbol, self.quote_token.symbol)
    }
}

#[cfg(test)]
mod tests {
    use fastnum::udec128;

    use super::*;
    use crate::client::raw::RawInt;

    fn registry() -> TokenRegistry {
        TokenRegistry::new([
            Token::new("USDC", 6, "0xusdc"),
            Token::new("ETH", 9, "0xeth"),
            Token::new("BTC", 8, "0xbtc"),
        ])
    }

    fn raw(base_token: &str, base_size: i64, price: u64) -> RawOrder {
        RawOrder {
            id: "0xtx-1".to_string(),
            trader: "0xtrader".to_string(),
            base_token: base_token.to_string(),
            base_size: RawInt::new(base_size),
            order_price: RawInt::new(price),
            block_timestamp: RawInt::new(1712345678),
        }
    }

    #[test]
    fn test_buy_order_conversion() {
        let order = Order::new(&raw("0xeth", 1_000_000_000, 2_000_000_000), &registry()).unwrap();

        assert_eq!(order.r#type(), OrderType::Buy);
        assert_eq!(order.base_size(), U256::from(1_000_000_000u64));
        assert_eq!(order.base_size_units(), udec128!(1));
        assert_eq!(order.price_units(), udec128!(2));
        assert_eq!(order.quote_size(), U256::from(2_000_000u64));
        assert_eq!(order.quote_size_units(), udec128!(2));
        assert_eq!(order.timestamp().timestamp(), 1712345678);
        assert_eq!(order.market_symbol(), "ETH-USDC");
    }

    #[test]
    fn test_sell_order_keeps_magnitude() {
        let order = Order::new(&raw("0xbtc", -50_000_000, 65_000_000_000_000), &registry()).unwrap();

        assert_eq!(order.r#type(), OrderType::Sell);
        assert_eq!(order.base_size(), U256::from(50_000_000u64));
        assert_eq!(order.base_size_units(), udec128!(0.5));
        assert_eq!(order.price_units(), udec128!(65000));
        assert_eq!(order.quote_size_units(), udec128!(32500));
    }

    #[test]
    fn test_quote_size_rounds_down() {
        // 0.000000001 ETH at 1.5 USDC is far below one raw USDC unit
        let order = Order::new(&raw("0xeth", 1, 1_500_000_000), &registry()).unwrap();
        assert_eq!(order.quote_size(), U256::ZERO);
        assert_eq!(order.quote_size_units(), UD128::ZERO);
    }

    #[test]
    fn test_quote_size_multiplies_before_dividing() {
        // 1500 * 1e9 / 1e18 would truncate to zero before scaling to USDC units
        let order = Order::new(&raw("0xeth", 1_500, 1_000_000_000), &registry()).unwrap();
        assert_eq!(order.quote_size(), U256::from(1));
        assert_eq!(order.quote_size_units(), udec128!(0.000001));
    }

    #[test]
    fn test_zero_size_is_buy() {
        let order = Order::new(&raw("0xeth", 0, 1), &registry()).unwrap();
        assert_eq!(order.r#type(), OrderType::Buy);
        assert_eq!(order.base_size(), U256::ZERO);
    }

    #[test]
    fn test_unknown_base_token() {
        assert_eq!(
            Order::new(&raw("0xdoge", 1, 1), &registry()).unwrap_err(),
            MapError::UnknownToken("0xdoge".to_string())
        );
    }

    #[test]
    fn test_missing_quote_token() {
        let registry = TokenRegistry::new([Token::new("ETH", 9, "0xeth")]);
        assert_eq!(
            Order::new(&raw("0xeth", 1, 1), &registry).unwrap_err(),
            MapError::MissingQuoteToken("USDC")
        );
    }

    #[test]
    fn test_order_type_display() {
        assert_eq!(OrderType::Buy.to_string(), "BUY");
        assert_eq!(OrderType::from_sign(true), OrderType::Sell);
    }
}

use alloy::primitives::U256;
use fastnum::UD128;

use super::{AssetId, RecordId};
use crate::{client::raw::RawTrade, error::MapError};

/// Trade matched at the spot market.
///
/// Amounts are kept in raw fixed-point units: trade amount in base token
/// units and price with [`super::PRICE_DECIMALS`] decimal places.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trade {
    pub id: RecordId,
    pub base_token: AssetId,
    pub matcher: String,
    pub trade_amount: U256,
    pub price: U256,
    /// Block timestamp, Unix seconds.
    pub timestamp: u64,
}

impl Trade {
    pub fn new(raw: &RawTrade) -> Result<Self, MapError> {
        Ok(Self {
            id: raw.id.clone(),
            base_token: raw.base_token.clone(),
            matcher: raw.matcher.clone(),
            trade_amount: raw.trade_amount.to_unsigned("tradeAmount")?,
            price: raw.price.to_unsigned("price")?,
            timestamp: raw.block_timestamp.to_u64("blockTimestamp")?,
        })
    }

    /// Price in quote token per base token, `None` if it does not fit
    /// into [`UD128`].
    pub fn price_units(&self) -> Option<UD128> {
        super::price_units(self.price)
    }
}

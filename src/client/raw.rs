//! Row shapes returned by the indexer, before conversion to typed records.
//!
//! Every field is required: a row missing any of them fails deserialization
//! of the whole response.

use alloy::primitives::{I256, U256};
use serde::{Deserialize, Deserializer};

use crate::{error::MapError, types};

/// Integer as serialized by the indexer.
///
/// `BigInt` columns arrive as decimal strings, `Int` columns as JSON numbers;
/// both are accepted and kept verbatim until conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawInt(pub String);

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: types::RecordId,
    pub trader: String,
    pub base_token: types::AssetId,
    pub base_size: RawInt,
    pub order_price: RawInt,
    pub block_timestamp: RawInt,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    pub id: types::RecordId,
    pub matcher: String,
    pub base_token: types::AssetId,
    pub trade_amount: RawInt,
    pub price: RawInt,
    pub block_timestamp: RawInt,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTradePrice {
    pub price: RawInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrdersData {
    pub orders: Vec<RawOrder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MarketCreateEventsData {
    pub market_create_events: Vec<types::MarketCreateEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TradeEventsData<T> {
    pub trade_events: Vec<T>,
}

impl RawInt {
    pub fn new(value: impl ToString) -> Self {
        Self(value.to_string())
    }

    pub fn to_signed(&self, field: &'static str) -> Result<I256, MapError> {
        I256::from_dec_str(&self.0).map_err(|_| self.invalid(field))
    }

    pub fn to_unsigned(&self, field: &'static str) -> Result<U256, MapError> {
        U256::from_str_radix(&self.0, 10).map_err(|_| self.invalid(field))
    }

    pub fn to_u64(&self, field: &'static str) -> Result<u64, MapError> {
        self.0.parse().map_err(|_| self.invalid(field))
    }

    fn invalid(&self, field: &'static str) -> MapError {
        MapError::InvalidInteger {
            field,
            value: self.0.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for RawInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Num(serde_json::Number),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Self(s),
            Repr::Num(n) => Self(n.to_string()),
        })
    }
}

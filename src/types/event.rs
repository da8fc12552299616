use serde::{Deserialize, Deserializer, de};

use super::{AssetId, RecordId};
use crate::client::raw::RawInt;

/// Spot market creation, as indexed from the market contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCreateEvent {
    pub id: RecordId,
    pub asset_id: AssetId,
    /// Decimal places of the market base token.
    #[serde(deserialize_with = "decimal_from_raw")]
    pub decimal: u8,
}

/// Accepts the decimal count as a JSON number or a decimal string.
fn decimal_from_raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = RawInt::deserialize(deserializer)?;
    let value = raw.to_u64("decimal").map_err(de::Error::custom)?;
    u8::try_from(value).map_err(de::Error::custom)
}

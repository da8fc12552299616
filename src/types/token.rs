use std::{collections::HashMap, fs, path::Path};

use crate::{error::Error, num};

use super::AssetId;

/// Symbol of the token all spot markets are quoted in.
pub const QUOTE_SYMBOL: &str = "USDC";

/// Token tradeable at the spot market.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub symbol: String,
    pub decimals: u8,
    pub asset_id: AssetId,
}

impl Token {
    pub fn new(symbol: impl Into<String>, decimals: u8, asset_id: impl Into<AssetId>) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            asset_id: asset_id.into(),
        }
    }

    /// Converter of amounts between raw token units and decimal representation.
    pub fn converter(&self) -> num::Converter {
        num::Converter::new(self.decimals)
    }
}

/// Static lookup table of known tokens, by asset ID and by symbol.
///
/// Asset IDs are matched case-insensitively, since the indexer reports
/// them lower-cased while user input often carries checksummed casing.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    by_asset_id: HashMap<AssetId, Token>,
    by_symbol: HashMap<String, Token>,
}

impl TokenRegistry {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        tokens
            .into_iter()
            .fold(Self::default(), |registry, token| registry.with_token(token))
    }

    /// Loads the registry from a JSON array of
    /// `{"symbol", "decimals", "assetId"}` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn from_json(content: &str) -> Result<Self, Error> {
        let tokens: Vec<Token> = serde_json::from_str(content)?;
        Ok(Self::new(tokens))
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.by_symbol.insert(token.symbol.clone(), token.clone());
        self.by_asset_id
            .insert(token.asset_id.to_ascii_lowercase(), token);
        self
    }

    pub fn by_asset_id(&self, asset_id: &str) -> Option<&Token> {
        self.by_asset_id.get(&asset_id.to_ascii_lowercase())
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.by_symbol.get(symbol)
    }

    /// Token all orders are quoted in, see [`QUOTE_SYMBOL`].
    pub fn quote_token(&self) -> Option<&Token> {
        self.by_symbol(QUOTE_SYMBOL)
    }

    pub fn len(&self) -> usize {
        self.by_asset_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_asset_id.is_empty()
    }
}

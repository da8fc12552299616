//! Spot market SDK.
//!
//! # Overview
//!
//! Typed access to spot market orders, trades and market listings indexed
//! by a GraphQL subgraph.
//!
//! Use [`client::MarketDataClient`] to query the [`Indexer`]. Raw on-chain
//! fixed-point amounts get converted into [`fastnum`] decimals using token
//! precision from [`types::TokenRegistry`]; prices always carry
//! [`types::PRICE_DECIMALS`] decimal places and every market is quoted in
//! [`types::QUOTE_SYMBOL`].
//!
//! # Limitations/follow-ups
//!
//! * The client never retries; failed requests produce empty results
//!   (or errors from the `try_` methods).
//!
//! * Pagination beyond the indexer `first` limit is not supported.
//!
//! # Testing
//!
//! [`testing`] module provides an in-memory transport with canned
//! responses and fixture builders.

pub mod client;
pub mod config;
pub mod error;
pub mod num;
pub mod testing;
pub mod types;

use std::time::Duration;

const ARBITRUM_SEPOLIA_URL: &str =
    "https://api.studio.thegraph.com/query/63182/arbitrum-sepolia-spot-market/version/latest";

#[derive(Clone, Debug)]
/// Indexer endpoint the markets are served from.
pub struct Indexer {
    url: String,
    timeout: Option<Duration>,
}

impl Indexer {
    pub fn arbitrum_sepolia() -> Self {
        Self::custom(ARBITRUM_SEPOLIA_URL)
    }

    pub fn custom(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Limit on the duration of a single request, none by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::arbitrum_sepolia()
    }
}

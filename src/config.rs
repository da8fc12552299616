//! Environment configuration.
//!
//! Variables are prefixed with `SPOT_MARKET_` and may come from a `.env`
//! file loaded with [`dotenvy`] beforehand.

use std::time::Duration;

use crate::{Indexer, error::Error, types::TokenRegistry};

const ENV_PREFIX: &str = "SPOT_MARKET_";

/// Environment configuration (endpoint, token list).
#[derive(Debug, Default, serde::Deserialize)]
pub struct EnvConfig {
    /// Indexer GraphQL endpoint, defaults to the Arbitrum Sepolia subgraph
    pub indexer_url: Option<String>,

    /// Optional timeout for indexer requests
    pub timeout_seconds: Option<u64>,

    /// JSON file with the token list, see [`TokenRegistry::from_json_file`]
    pub tokens_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn indexer(&self) -> Indexer {
        let indexer = match &self.indexer_url {
            Some(url) => Indexer::custom(url.clone()),
            None => Indexer::arbitrum_sepolia(),
        };
        match self.timeout_seconds {
            Some(secs) => indexer.with_timeout(Duration::from_secs(secs)),
            None => indexer,
        }
    }

    /// Token registry from the configured file, empty if none.
    pub fn token_registry(&self) -> Result<TokenRegistry, Error> {
        match &self.tokens_file {
            Some(path) => TokenRegistry::from_json_file(path),
            None => Ok(TokenRegistry::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_from_iter() {
        let config: EnvConfig = envy::prefixed(ENV_PREFIX)
            .from_iter([
                (
                    "SPOT_MARKET_INDEXER_URL".to_string(),
                    "http://localhost:8000/subgraphs/name/spot".to_string(),
                ),
                ("SPOT_MARKET_TIMEOUT_SECONDS".to_string(), "7".to_string()),
            ])
            .unwrap();

        let indexer = config.indexer();
        assert_eq!(indexer.url(), "http://localhost:8000/subgraphs/name/spot");
        assert_eq!(indexer.timeout(), Some(Duration::from_secs(7)));
        assert!(config.token_registry().unwrap().is_empty());
    }

    #[test]
    fn test_env_config_defaults() {
        let config: EnvConfig = envy::prefixed(ENV_PREFIX)
            .from_iter(Vec::<(String, String)>::new())
            .unwrap();

        assert_eq!(config.indexer().url(), Indexer::arbitrum_sepolia().url());
        assert_eq!(config.indexer().timeout(), None);
    }

    #[test]
    fn test_env_config_rejects_bad_timeout() {
        let res: Result<EnvConfig, _> = envy::prefixed(ENV_PREFIX).from_iter([(
            "SPOT_MARKET_TIMEOUT_SECONDS".to_string(),
            "soon".to_string(),
        )]);
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_tokens_file() {
        let config = EnvConfig {
            tokens_file: Some("/nonexistent/tokens.json".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.token_registry(),
            Err(Error::Io(_))
        ));
    }
}

use std::future::Future;

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::query::GraphQlRequest;
use crate::{Indexer, error::Error};

/// Delivers GraphQL requests to the indexer and returns the raw JSON body.
///
/// [`HttpTransport`] is the production implementation, see
/// [`crate::testing::MockTransport`] for tests.
pub trait Transport {
    fn post(&self, request: &GraphQlRequest) -> impl Future<Output = Result<Value, Error>> + Send;
}

/// HTTP POST transport.
///
/// Applies the indexer request timeout if configured, otherwise a stuck
/// connection blocks the caller until the OS gives up.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
}

impl HttpTransport {
    pub fn new(indexer: &Indexer) -> Result<Self, Error> {
        let url = Url::parse(indexer.url())?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = indexer.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: &GraphQlRequest) -> Result<Value, Error> {
        debug!(url = %self.url, query = request.query, variables = %request.variables, "indexer request");
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            HttpTransport::new(&Indexer::custom("not a url")),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_builds_for_default_indexer() {
        let transport =
            HttpTransport::new(&Indexer::arbitrum_sepolia().with_timeout(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(transport.url().scheme(), "https");
        assert_eq!(transport.url().host_str(), Some("api.studio.thegraph.com"));
    }
}

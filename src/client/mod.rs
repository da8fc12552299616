//! Spot market indexer client.

pub mod query;
pub mod raw;
mod transport;

use std::sync::Arc;

use alloy::primitives::U256;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

pub use query::{GraphQlRequest, OrdersQuery};
pub use transport::{HttpTransport, Transport};

use crate::{
    Indexer,
    error::{Error, MapError},
    types::{MarketCreateEvent, Order, TokenRegistry, Trade},
};

/// Fetches spot market records from the indexer and converts them into
/// typed records.
///
/// Every `fetch_*` method logs failures and returns an empty result
/// (zero for [`Self::fetch_market_price`]), so an empty list can mean both
/// "no data" and "request failed". Use the `try_fetch_*` counterparts to
/// tell those apart.
///
/// Records come in the order the indexer returned them.
#[derive(Clone, Debug)]
pub struct MarketDataClient<T> {
    transport: T,
    registry: Arc<TokenRegistry>,
}

impl MarketDataClient<HttpTransport> {
    /// Client talking to the indexer over HTTP.
    pub fn connect(indexer: &Indexer, registry: TokenRegistry) -> Result<Self, Error> {
        Ok(Self::new(HttpTransport::new(indexer)?, registry))
    }
}

impl<T: Transport> MarketDataClient<T> {
    pub fn new(transport: T, registry: TokenRegistry) -> Self {
        Self {
            transport,
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Orders of the given market, see [`OrdersQuery`] for the filters.
    pub async fn fetch_orders(&self, query: &OrdersQuery) -> Vec<Order> {
        self.try_fetch_orders(query).await.unwrap_or_else(|err| {
            error!(%err, base_token = %query.base_token, "Error during Orders request");
            Vec::new()
        })
    }

    /// Orders with tokens missing from the registry are skipped.
    pub async fn try_fetch_orders(&self, query: &OrdersQuery) -> Result<Vec<Order>, Error> {
        let data: raw::OrdersData = self.query(query.request()).await?;
        let mut orders = Vec::with_capacity(data.orders.len());
        for row in &data.orders {
            match Order::new(row, &self.registry) {
                Ok(order) => orders.push(order),
                Err(MapError::UnknownToken(asset_id)) => {
                    warn!(order_id = %row.id, %asset_id, "skipping order of unknown token");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(orders)
    }

    pub async fn fetch_market_create_events(&self, limit: i64) -> Vec<MarketCreateEvent> {
        self.try_fetch_market_create_events(limit)
            .await
            .unwrap_or_else(|err| {
                error!(%err, "Error during MarketCreateEvents request");
                Vec::new()
            })
    }

    pub async fn try_fetch_market_create_events(
        &self,
        limit: i64,
    ) -> Result<Vec<MarketCreateEvent>, Error> {
        let data: raw::MarketCreateEventsData =
            self.query(query::market_create_events(limit)).await?;
        Ok(data.market_create_events)
    }

    /// Price of the latest trade, with [`crate::types::PRICE_DECIMALS`]
    /// decimal places, zero if the market has no trades yet.
    pub async fn fetch_market_price(&self, base_token: &str) -> U256 {
        self.try_fetch_market_price(base_token)
            .await
            .unwrap_or_else(|err| {
                error!(%err, %base_token, "Error during market price request");
                U256::ZERO
            })
    }

    pub async fn try_fetch_market_price(&self, base_token: &str) -> Result<U256, Error> {
        let data: raw::TradeEventsData<raw::RawTradePrice> =
            self.query(query::market_price(base_token)).await?;
        match data.trade_events.first() {
            Some(trade) => Ok(trade.price.to_unsigned("price")?),
            None => Ok(U256::ZERO),
        }
    }

    pub async fn fetch_trades(&self, base_token: &str, limit: i64) -> Vec<Trade> {
        self.try_fetch_trades(base_token, limit)
            .await
            .unwrap_or_else(|err| {
                error!(%err, %base_token, "Error during Trades request");
                Vec::new()
            })
    }

    pub async fn try_fetch_trades(&self, base_token: &str, limit: i64) -> Result<Vec<Trade>, Error> {
        let data: raw::TradeEventsData<raw::RawTrade> =
            self.query(query::trades(base_token, limit)).await?;
        Ok(data
            .trade_events
            .iter()
            .map(Trade::new)
            .collect::<Result<_, _>>()?)
    }

    async fn query<D: DeserializeOwned>(&self, request: GraphQlRequest) -> Result<D, Error> {
        let body = self.transport.post(&request).await?;
        let response: query::GraphQlResponse<D> = serde_json::from_value(body)?;
        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            return Err(Error::Remote(
                errors.into_iter().map(|err| err.message).collect(),
            ));
        }
        response
            .data
            .ok_or_else(|| Error::MalformedResponse("missing `data`".to_string()))
    }
}

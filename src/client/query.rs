//! GraphQL documents and their variables.
//!
//! Caller-supplied values never get interpolated into the documents, they
//! travel in the `variables` object of the request.

use serde_json::{Map, Value, json};

use crate::types::{self, OrderType};

pub const ORDERS: &str = "\
query Orders($first: Int!, $where: Order_filter) {
  orders(first: $first, where: $where) {
    id
    trader
    baseToken
    baseSize
    orderPrice
    blockTimestamp
  }
}";

pub const MARKET_CREATE_EVENTS: &str = "\
query MarketCreateEvents($first: Int!) {
  marketCreateEvents(first: $first) {
    id
    assetId
    decimal
  }
}";

pub const MARKET_PRICE: &str = "\
query MarketPrice($where: TradeEvent_filter) {
  tradeEvents(first: 1, where: $where) {
    price
  }
}";

pub const TRADES: &str = "\
query Trades($first: Int!, $where: TradeEvent_filter) {
  tradeEvents(first: $first, where: $where) {
    id
    matcher
    baseToken
    tradeAmount
    price
    blockTimestamp
  }
}";

/// Request body posted to the indexer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
}

/// Response envelope of the indexer.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct GraphQlResponse<D> {
    pub data: Option<D>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

/// Parameters of an orders lookup.
///
/// `limit` is forwarded to the indexer as-is, without local validation.
#[derive(Clone, Debug)]
pub struct OrdersQuery {
    pub base_token: types::AssetId,
    pub limit: i64,
    pub r#type: Option<OrderType>,
    pub trader: Option<String>,
}

impl OrdersQuery {
    pub fn new(base_token: impl Into<types::AssetId>, limit: i64) -> Self {
        Self {
            base_token: base_token.into(),
            limit,
            r#type: None,
            trader: None,
        }
    }

    /// Only orders of the given direction.
    pub fn with_type(mut self, r#type: OrderType) -> Self {
        self.r#type = Some(r#type);
        self
    }

    /// Only orders of the given trader, address is matched lower-cased.
    pub fn with_trader(mut self, trader: impl Into<String>) -> Self {
        self.trader = Some(trader.into());
        self
    }

    pub fn request(&self) -> GraphQlRequest {
        let mut filter = Map::new();
        filter.insert("baseToken".to_string(), json!(self.base_token));
        match self.r#type {
            Some(OrderType::Buy) => {
                filter.insert("baseSize_gt".to_string(), json!("0"));
            }
            Some(OrderType::Sell) => {
                filter.insert("baseSize_lt".to_string(), json!("0"));
            }
            None => {}
        }
        if let Some(trader) = &self.trader {
            filter.insert("trader".to_string(), json!(trader.to_lowercase()));
        }
        GraphQlRequest {
            query: ORDERS,
            variables: json!({ "first": self.limit, "where": filter }),
        }
    }
}

pub fn market_create_events(limit: i64) -> GraphQlRequest {
    GraphQlRequest {
        query: MARKET_CREATE_EVENTS,
        variables: json!({ "first": limit }),
    }
}

pub fn market_price(base_token: &str) -> GraphQlRequest {
    GraphQlRequest {
        query: MARKET_PRICE,
        variables: json!({ "where": { "baseToken": base_token } }),
    }
}

pub fn trades(base_token: &str, limit: i64) -> GraphQlRequest {
    GraphQlRequest {
        query: TRADES,
        variables: json!({ "first": limit, "where": { "baseToken": base_token } }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_filter_without_options() {
        let request = OrdersQuery::new("0xABC", 25).request();
        assert_eq!(request.query, ORDERS);
        assert_eq!(
            request.variables,
            json!({ "first": 25, "where": { "baseToken": "0xABC" } })
        );
    }

    #[test]
    fn test_orders_filter_by_direction() {
        let buy = OrdersQuery::new("0xABC", 10)
            .with_type(OrderType::Buy)
            .request();
        assert_eq!(buy.variables["where"]["baseSize_gt"], json!("0"));
        assert!(buy.variables["where"].get("baseSize_lt").is_none());

        let sell = OrdersQuery::new("0xABC", 10)
            .with_type(OrderType::Sell)
            .request();
        assert_eq!(sell.variables["where"]["baseSize_lt"], json!("0"));
        assert!(sell.variables["where"].get("baseSize_gt").is_none());
    }

    #[test]
    fn test_orders_filter_lowercases_trader() {
        let request = OrdersQuery::new("0xABC", 10)
            .with_trader("0xDeAdBeEf")
            .request();
        assert_eq!(request.variables["where"]["trader"], json!("0xdeadbeef"));
        // Base token goes out verbatim
        assert_eq!(request.variables["where"]["baseToken"], json!("0xABC"));
    }

    #[test]
    fn test_invalid_limit_is_forwarded() {
        assert_eq!(OrdersQuery::new("0x1", -5).request().variables["first"], json!(-5));
        assert_eq!(market_create_events(0).variables, json!({ "first": 0 }));
    }

    #[test]
    fn test_values_are_not_interpolated() {
        let request = trades("\") { __schema { types { name } } } #", 3);
        assert_eq!(request.query, TRADES);
        assert_eq!(
            request.variables["where"]["baseToken"],
            json!("\") { __schema { types { name } } } #")
        );
        assert_eq!(market_price("0x1").query, MARKET_PRICE);
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(market_create_events(5)).unwrap();
        assert_eq!(body["query"], json!(MARKET_CREATE_EVENTS));
        assert_eq!(body["variables"], json!({ "first": 5 }));
    }
}

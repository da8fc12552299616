//! Test utilities.
//!
//! [`MockTransport`] replays canned indexer responses in order and records
//! every request it receives, so tests can assert on the outgoing filters.
//!
//! [`registry`] provides a token registry matching the fixtures.

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Arc, Mutex},
};

use serde_json::{Value, json};

use crate::{
    client::{GraphQlRequest, Transport},
    error::Error,
    types::{Token, TokenRegistry},
};

pub const USDC: &str = "0x75faf114eafb1bdbe2f0316df893fd58ce46aa4d";
pub const BTC: &str = "0x1b1a2c8e8a7c0f4f5a13f2c1b3d6f5e44d1e7c2a";
pub const ETH: &str = "0x980b62da83eff3d4576c647993b0c1d7faf17c73";

/// Registry with USDC (6), BTC (8) and ETH (18) under the fixture asset IDs.
pub fn registry() -> TokenRegistry {
    TokenRegistry::new([
        Token::new("USDC", 6, USDC),
        Token::new("BTC", 8, BTC),
        Token::new("ETH", 18, ETH),
    ])
}

/// Wraps rows into an indexer response `{"data": {<field>: rows}}`.
pub fn response(field: &str, rows: Value) -> Value {
    json!({ "data": { field: rows } })
}

/// Order row as returned by the indexer.
pub fn order_row(id: &str, base_token: &str, base_size: i128, price: u128, timestamp: u64) -> Value {
    json!({
        "id": id,
        "trader": "0x5e1f0c9ddbe3cb57b80c933fab5151627d7966fa",
        "baseToken": base_token,
        "baseSize": base_size.to_string(),
        "orderPrice": price.to_string(),
        "blockTimestamp": timestamp.to_string(),
    })
}

/// Trade row as returned by the indexer.
pub fn trade_row(id: &str, base_token: &str, amount: u128, price: u128, timestamp: u64) -> Value {
    json!({
        "id": id,
        "matcher": "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
        "baseToken": base_token,
        "tradeAmount": amount.to_string(),
        "price": price.to_string(),
        "blockTimestamp": timestamp.to_string(),
    })
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<Value, String>>,
    requests: Vec<GraphQlRequest>,
}

/// In-memory [`Transport`], clones share the same state.
///
/// Once the canned responses run out, requests fail with a transport error.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    pub fn respond(self, body: Value) -> Self {
        self.push(Ok(body));
        self
    }

    /// Queues a transport failure.
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(Err(reason.into()));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, response: Result<Value, String>) {
        if let Ok(mut state) = self.state.lock() {
            state.responses.push_back(response);
        }
    }
}

impl Transport for MockTransport {
    fn post(&self, request: &GraphQlRequest) -> impl Future<Output = Result<Value, Error>> + Send {
        let response = match self.state.lock() {
            Ok(mut state) => {
                state.requests.push(request.clone());
                state
                    .responses
                    .pop_front()
                    .unwrap_or_else(|| Err("no response queued".to_string()))
            }
            Err(err) => Err(err.to_string()),
        };
        std::future::ready(response.map_err(Error::Transport))
    }
}

use crate::types;

/// Error returned by the indexer client.
///
/// The infallible `fetch_*` methods of [`crate::client::MarketDataClient`]
/// log these and return an empty result instead; the `try_fetch_*`
/// counterparts surface them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    #[error("indexer returned errors: {}", .0.join("; "))]
    Remote(Vec<String>),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("record conversion error: {0}")]
    Map(#[from] MapError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid indexer URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Error converting a raw indexer row into a typed record.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("unknown token: {0}")]
    UnknownToken(types::AssetId),

    #[error("quote token {0} is not registered")]
    MissingQuoteToken(&'static str),

    #[error("invalid integer in field `{field}`: {value}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("numeric overflow in field `{0}`")]
    Overflow(&'static str),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(u64),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Self::Status(status.as_u16()),
            None if value.is_decode() => Self::MalformedResponse(value.to_string()),
            None => Self::Transport(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedResponse(value.to_string())
    }
}

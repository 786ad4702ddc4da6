use thiserror::Error;

/// Errors returned by the search-cluster client.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cluster answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid cluster URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl SearchError {
    /// `true` when the request was abandoned because it exceeded its timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, SearchError::Http(e) if e.is_timeout())
    }
}

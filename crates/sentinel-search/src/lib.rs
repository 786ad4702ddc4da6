//! Query builder and HTTP client for the mention search index.

pub mod client;
pub mod error;
pub mod query;
pub mod source;
pub mod types;

mod retry;

pub use client::ElasticClient;
pub use error::SearchError;
pub use query::{fields, Clause, MentionQuery, SearchRequest};
pub use source::MentionSource;
pub use types::{ClusterInfo, SearchResponse};

//! Mention analytics: keyword normalization, frequency ranking, period
//! comparison and the dashboard metrics built from them.

pub mod compare;
pub mod frequency;
pub mod metrics;
pub mod sentiment;
pub mod text;
pub mod types;

pub use compare::{compare, Comparison, Direction};
pub use frequency::{FrequencyRow, FrequencyTable};
pub use metrics::{
    brand_health, mentions_by_sentiment, mentions_over_time, result_summary, sentiment_counts,
    top_authors, top_keywords, Scope,
};
pub use sentiment::{brand_health_score, SentimentCounts};
pub use text::normalize;
pub use types::{AuthorRow, BrandHealth, KeywordRow, ResultSummary};

use std::future::Future;

use sentinel_core::Mention;

use crate::client::ElasticClient;
use crate::error::SearchError;
use crate::query::MentionQuery;

/// Read access to the mention index.
///
/// The analytics layer is written against this trait so metrics can be
/// exercised without a cluster; [`ElasticClient`] is the production
/// implementation.
pub trait MentionSource: Sync {
    /// Mentions matching `query`, projected to `fields` when non-empty.
    fn mentions(
        &self,
        query: &MentionQuery,
        fields: &[&str],
    ) -> impl Future<Output = Result<Vec<Mention>, SearchError>> + Send;

    /// Exact count of mentions matching `query`.
    fn count(&self, query: &MentionQuery)
        -> impl Future<Output = Result<u64, SearchError>> + Send;

    /// Count of every document in the index.
    fn count_all(&self) -> impl Future<Output = Result<u64, SearchError>> + Send;
}

impl MentionSource for ElasticClient {
    async fn mentions(
        &self,
        query: &MentionQuery,
        fields: &[&str],
    ) -> Result<Vec<Mention>, SearchError> {
        self.fetch_mentions(query, fields).await
    }

    async fn count(&self, query: &MentionQuery) -> Result<u64, SearchError> {
        self.count_mentions(query).await
    }

    async fn count_all(&self) -> Result<u64, SearchError> {
        ElasticClient::count_all(self).await
    }
}

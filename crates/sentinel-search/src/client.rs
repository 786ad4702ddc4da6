//! HTTP client for the mention index.
//!
//! Wraps `reqwest` with cluster-specific URL handling, optional basic auth,
//! per-call timeouts and retry on transient failures. One client is built at
//! startup and shared; `reqwest::Client` pools connections internally.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use sentinel_core::{AppConfig, ElasticCredentials, Mention};

use crate::error::SearchError;
use crate::query::{MentionQuery, SearchRequest};
use crate::retry::retry_with_backoff;
use crate::types::{ClusterInfo, SearchResponse};

const DEFAULT_MAX_HITS: usize = 1000;
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for one index on a search cluster.
///
/// Use [`ElasticClient::from_config`] in the server or
/// [`ElasticClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ElasticClient {
    client: Client,
    base_url: Url,
    index: String,
    credentials: Option<ElasticCredentials>,
    max_retries: u32,
    backoff_base_ms: u64,
    max_hits: usize,
}

impl ElasticClient {
    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SearchError::InvalidBaseUrl`] for an unparseable cluster URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let mut client = Self::with_base_url(
            &config.elastic_url,
            &config.elastic_index,
            config.search_timeout_secs,
        )?
        .with_retry(config.search_max_retries, config.search_retry_backoff_ms)
        .with_max_hits(config.search_max_hits);
        client.credentials.clone_from(&config.elastic_credentials);
        Ok(client)
    }

    /// Creates a client with no retries and no credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SearchError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        index: &str,
        timeout_secs: u64,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.clamp(1, 10)))
            .user_agent(concat!("sentinel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Normalise to exactly one trailing slash so path segments append
        // rather than replace.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SearchError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            index: index.to_string(),
            credentials: None,
            max_retries: 0,
            backoff_base_ms: 0,
            max_hits: DEFAULT_MAX_HITS,
        })
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: ElasticCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits.max(1);
        self
    }

    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Fetches up to the configured hit limit of mentions matching `query`,
    /// projected to `source_fields` when non-empty.
    ///
    /// Matches beyond the limit are dropped and logged at `warn`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure or timeout.
    /// - [`SearchError::UnexpectedStatus`] on a non-2xx answer.
    /// - [`SearchError::Deserialize`] if the response shape is unexpected.
    pub async fn fetch_mentions(
        &self,
        query: &MentionQuery,
        source_fields: &[&str],
    ) -> Result<Vec<Mention>, SearchError> {
        let request = query.hits_request(self.max_hits, source_fields);
        let response: SearchResponse<Mention> = self.search(&request).await?;
        let total = response.total();
        let mentions = response.into_sources();
        if total > mentions.len() as u64 {
            tracing::warn!(
                project = query.project_id(),
                returned = mentions.len(),
                total,
                max_hits = self.max_hits,
                "hit cap reached; metric covers a subset of matching mentions"
            );
        } else {
            tracing::debug!(
                project = query.project_id(),
                returned = mentions.len(),
                total,
                "fetched mentions"
            );
        }
        Ok(mentions)
    }

    /// Exact number of mentions matching `query`.
    ///
    /// # Errors
    ///
    /// Same as [`ElasticClient::fetch_mentions`].
    pub async fn count_mentions(&self, query: &MentionQuery) -> Result<u64, SearchError> {
        let response: SearchResponse<serde_json::Value> =
            self.search(&query.count_request()).await?;
        Ok(response.total())
    }

    /// Number of documents in the whole index, across every project.
    ///
    /// # Errors
    ///
    /// Same as [`ElasticClient::fetch_mentions`].
    pub async fn count_all(&self) -> Result<u64, SearchError> {
        let response: SearchResponse<serde_json::Value> =
            self.search(&SearchRequest::match_all_count()).await?;
        Ok(response.total())
    }

    /// Probes the cluster banner. Not retried; used for health checks.
    ///
    /// # Errors
    ///
    /// Same as [`ElasticClient::fetch_mentions`].
    pub async fn ping(&self) -> Result<ClusterInfo, SearchError> {
        let url = self.base_url.clone();
        let response = self.authorized(self.client.get(url.clone())).send().await?;
        Self::read_json(url, response).await
    }

    /// Sends `request` to `{index}/_search` with retry on transient errors.
    ///
    /// # Errors
    ///
    /// Same as [`ElasticClient::fetch_mentions`].
    pub async fn search<T: DeserializeOwned>(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse<T>, SearchError> {
        let url = self.endpoint(&[&self.index, "_search"]);
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .authorized(self.client.post(url.clone()).json(request))
                    .send()
                    .await?;
                Self::read_json(url, response).await
            }
        })
        .await
    }

    /// Appends path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(creds) => builder.basic_auth(&creds.username, Some(&creds.password)),
            None => builder,
        }
    }

    /// Asserts a 2xx status and parses the body as JSON.
    async fn read_json<T: DeserializeOwned>(
        url: Url,
        response: reqwest::Response,
    ) -> Result<T, SearchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

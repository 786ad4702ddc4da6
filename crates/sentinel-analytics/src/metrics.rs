//! Dashboard metrics over one project's mentions in a date window.
//!
//! Every function is generic over [`MentionSource`] so it can run against the
//! live cluster or an in-memory fake. Independent sub-queries are issued
//! concurrently and any failure fails the whole metric.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use sentinel_core::{DateWindow, Sentiment};
use sentinel_search::{fields, MentionQuery, MentionSource, SearchError};

use crate::compare::compare;
use crate::frequency::FrequencyTable;
use crate::sentiment::SentimentCounts;
use crate::text::normalize;
use crate::types::{AuthorRow, BrandHealth, KeywordRow, ResultSummary};

/// The project and date window a metric is computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub project_id: String,
    pub window: DateWindow,
}

impl Scope {
    pub fn new(project_id: impl Into<String>, window: DateWindow) -> Self {
        Self {
            project_id: project_id.into(),
            window,
        }
    }

    #[must_use]
    pub fn query(&self) -> MentionQuery {
        MentionQuery::new(self.project_id.clone(), self.window)
    }

    /// Same project, the equal-length window ending where this one starts.
    #[must_use]
    pub fn prior(&self) -> Scope {
        Scope {
            project_id: self.project_id.clone(),
            window: self.window.prior(),
        }
    }
}

/// Authors of the project's mentions, highest follower count first.
///
/// Authors are not deduplicated: one row per mention.
///
/// # Errors
///
/// Returns the first [`SearchError`] from the underlying query.
pub async fn top_authors<S: MentionSource>(
    source: &S,
    scope: &Scope,
    limit: Option<usize>,
) -> Result<Vec<AuthorRow>, SearchError> {
    let query = scope.query().sorted_by_followers();
    let mentions = source.mentions(&query, fields::AUTHOR).await?;

    let mut rows: Vec<AuthorRow> = mentions.into_iter().map(AuthorRow::from).collect();
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    tracing::debug!(project_id = %scope.project_id, rows = rows.len(), "top authors computed");
    Ok(rows)
}

/// Keywords across the project's mention texts, most frequent first.
///
/// # Errors
///
/// Returns the first [`SearchError`] from the underlying query.
pub async fn top_keywords<S: MentionSource>(
    source: &S,
    scope: &Scope,
    limit: Option<usize>,
) -> Result<Vec<KeywordRow>, SearchError> {
    let mentions = source.mentions(&scope.query(), &[fields::FULL_TEXT]).await?;

    let mut table = FrequencyTable::count_flat(mentions.iter().map(|m| normalize(&m.full_text)));
    if let Some(limit) = limit {
        table.truncate(limit);
    }
    tracing::debug!(
        project_id = %scope.project_id,
        documents = mentions.len(),
        distinct = table.len(),
        "top keywords computed"
    );

    Ok(table
        .into_rows()
        .into_iter()
        .map(|row| KeywordRow {
            word: row.value,
            count: row.count,
        })
        .collect())
}

/// Mention counts keyed by the raw `created_at` value, in key order.
///
/// Timestamps are used as indexed, with no rounding into buckets. Documents
/// without a timestamp are skipped.
///
/// # Errors
///
/// Returns the first [`SearchError`] from the underlying query.
pub async fn mentions_over_time<S: MentionSource>(
    source: &S,
    scope: &Scope,
) -> Result<BTreeMap<String, u64>, SearchError> {
    let mentions = source.mentions(&scope.query(), &[fields::CREATED_AT]).await?;

    let table = FrequencyTable::count(
        mentions
            .into_iter()
            .map(|m| m.created_at)
            .filter(|ts| !ts.is_empty()),
    );
    Ok(table
        .into_rows()
        .into_iter()
        .map(|row| (row.value, row.count))
        .collect())
}

/// Exact count for each sentiment label, one count query per label.
///
/// # Errors
///
/// Returns the first [`SearchError`] from any of the label queries.
pub async fn sentiment_counts<S: MentionSource>(
    source: &S,
    scope: &Scope,
) -> Result<SentimentCounts, SearchError> {
    let buckets = try_join_all(Sentiment::ALL.iter().map(|&sentiment| {
        let query = scope.query().with_sentiment(sentiment);
        async move {
            let n = source.count(&query).await?;
            Ok::<_, SearchError>((sentiment, n))
        }
    }))
    .await?;

    Ok(SentimentCounts::from_table(&FrequencyTable::count_weighted(
        buckets,
    )))
}

/// Three single-entry tables, `[{NEUTRAL: n}, {POSITIVE: n}, {NEGATIVE: n}]`.
///
/// # Errors
///
/// Returns the first [`SearchError`] from any of the label queries.
pub async fn mentions_by_sentiment<S: MentionSource>(
    source: &S,
    scope: &Scope,
) -> Result<Vec<BTreeMap<&'static str, u64>>, SearchError> {
    Ok(sentiment_counts(source, scope).await?.tables())
}

/// # Errors
///
/// Returns the first [`SearchError`] from any of the label queries.
pub async fn brand_health<S: MentionSource>(
    source: &S,
    scope: &Scope,
) -> Result<BrandHealth, SearchError> {
    let counts = sentiment_counts(source, scope).await?;
    Ok(BrandHealth {
        score: counts.brand_health(),
    })
}

/// Index-wide total plus positive/negative movement against the prior window.
///
/// Totals compared between windows are positive plus negative; neutral
/// mentions are left out.
///
/// # Errors
///
/// Returns the first [`SearchError`] from any of the seven queries.
pub async fn result_summary<S: MentionSource>(
    source: &S,
    scope: &Scope,
) -> Result<ResultSummary, SearchError> {
    let prior_scope = scope.prior();
    let (index_total, now, prior) = futures::try_join!(
        source.count_all(),
        sentiment_counts(source, scope),
        sentiment_counts(source, &prior_scope),
    )?;

    tracing::debug!(
        project_id = %scope.project_id,
        index_total,
        now_polarized = now.polarized(),
        prior_polarized = prior.polarized(),
        "result summary computed"
    );

    Ok(ResultSummary::new(
        index_total,
        now.positive,
        now.negative,
        compare(now.polarized(), prior.polarized()),
        compare(now.positive, prior.positive),
        compare(now.negative, prior.negative),
    ))
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;

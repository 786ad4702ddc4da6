use serde::Serialize;
use utoipa::ToSchema;

use sentinel_core::Mention;

use crate::compare::{Comparison, Direction};

/// One row of the top-authors table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorRow {
    pub followers_count: u64,
    pub name: String,
    pub screen_name: String,
    pub statuses_count: u64,
    pub favorite_count: u64,
    pub profile_image_url_https: String,
}

impl From<Mention> for AuthorRow {
    fn from(m: Mention) -> Self {
        Self {
            followers_count: m.followers_count,
            name: m.name,
            screen_name: m.screen_name,
            statuses_count: m.statuses_count,
            favorite_count: m.favorite_count,
            profile_image_url_https: m.profile_image_url_https,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct KeywordRow {
    pub word: String,
    pub count: u64,
}

/// Share of polarized mentions that are positive, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct BrandHealth {
    pub score: f64,
}

/// Current-window counts with their change against the prior window.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    /// Every document in the index, regardless of project or window.
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub total_direction: Direction,
    pub positive_direction: Direction,
    pub negative_direction: Direction,
    pub total_percent: Option<f64>,
    pub positive_percent: Option<f64>,
    pub negative_percent: Option<f64>,
}

impl ResultSummary {
    #[must_use]
    pub fn new(
        index_total: u64,
        positive: u64,
        negative: u64,
        total: Comparison,
        positive_change: Comparison,
        negative_change: Comparison,
    ) -> Self {
        Self {
            total: index_total,
            positive,
            negative,
            total_direction: total.direction,
            positive_direction: positive_change.direction,
            negative_direction: negative_change.direction,
            total_percent: total.percent,
            positive_percent: positive_change.percent,
            negative_percent: negative_change.percent,
        }
    }
}

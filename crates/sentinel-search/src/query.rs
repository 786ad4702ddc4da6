//! Typed subset of the cluster's JSON query DSL.
//!
//! Request bodies are assembled from these types and serialized with serde;
//! caller-supplied values only ever land in JSON string positions.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use sentinel_core::{DateWindow, Sentiment};

/// Document field names in the mention index.
pub mod fields {
    pub const PROJECT_ID: &str = "projectId";
    pub const CREATED_AT: &str = "created_at";
    pub const SENTIMENT: &str = "sentiment";
    pub const FOLLOWERS_COUNT: &str = "followers_count";
    pub const FULL_TEXT: &str = "full_text";

    /// Author columns returned by the top-authors metric.
    pub const AUTHOR: &[&str] = &[
        "followers_count",
        "name",
        "screen_name",
        "statuses_count",
        "favorite_count",
        "profile_image_url_https",
    ];
}

/// A `{ "<field>": <value> }` object, the shape shared by match, range and sort.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    pub name: String,
    pub value: T,
}

impl<T> Field<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.value)?;
        map.end()
    }
}

/// Range bounds; only the half-open `[gte, lt)` form is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<String>,
}

impl RangeBounds {
    #[must_use]
    pub fn half_open(gte: impl Into<String>, lt: impl Into<String>) -> Self {
        Self {
            gte: Some(gte.into()),
            lt: Some(lt.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Clause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Clause>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchAll {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    Match(Field<String>),
    Range(Field<RangeBounds>),
    Bool(BoolQuery),
    MatchAll(MatchAll),
}

impl Clause {
    pub fn matches(field: &str, value: impl Into<String>) -> Self {
        Clause::Match(Field::new(field, value.into()))
    }

    #[must_use]
    pub fn range(field: &str, bounds: RangeBounds) -> Self {
        Clause::Range(Field::new(field, bounds))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Body of a `_search` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: Clause,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Field<SortOrder>>,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_total_hits: Option<bool>,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,
}

impl SearchRequest {
    /// Counts every document in the index without returning any.
    #[must_use]
    pub fn match_all_count() -> Self {
        Self {
            query: Clause::MatchAll(MatchAll {}),
            sort: Vec::new(),
            size: 0,
            track_total_hits: Some(true),
            source: None,
        }
    }
}

/// Mentions of one project inside a date window, optionally narrowed to a
/// sentiment label.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionQuery {
    project_id: String,
    window: DateWindow,
    sentiment: Option<Sentiment>,
    sort_by_followers: bool,
}

impl MentionQuery {
    pub fn new(project_id: impl Into<String>, window: DateWindow) -> Self {
        Self {
            project_id: project_id.into(),
            window,
            sentiment: None,
            sort_by_followers: false,
        }
    }

    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    #[must_use]
    pub fn sorted_by_followers(mut self) -> Self {
        self.sort_by_followers = true;
        self
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    #[must_use]
    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    #[must_use]
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    /// The filter itself: project match, optional sentiment match and the
    /// `[start, end)` range on the creation timestamp.
    #[must_use]
    pub fn to_clause(&self) -> Clause {
        let mut must = vec![Clause::matches(fields::PROJECT_ID, &self.project_id)];
        if let Some(sentiment) = self.sentiment {
            must.push(Clause::matches(fields::SENTIMENT, sentiment.as_str()));
        }
        Clause::Bool(BoolQuery {
            must,
            filter: vec![Clause::range(
                fields::CREATED_AT,
                RangeBounds::half_open(self.window.start_param(), self.window.end_param()),
            )],
        })
    }

    /// A request returning up to `size` hits, projected to `source_fields`
    /// when non-empty.
    #[must_use]
    pub fn hits_request(&self, size: usize, source_fields: &[&str]) -> SearchRequest {
        let sort = if self.sort_by_followers {
            vec![Field::new(fields::FOLLOWERS_COUNT, SortOrder::Desc)]
        } else {
            Vec::new()
        };
        let source = (!source_fields.is_empty())
            .then(|| source_fields.iter().map(|f| (*f).to_string()).collect());
        SearchRequest {
            query: self.to_clause(),
            sort,
            size,
            track_total_hits: None,
            source,
        }
    }

    /// A request that only reports the exact number of matching documents.
    #[must_use]
    pub fn count_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.to_clause(),
            sort: Vec::new(),
            size: 0,
            track_total_hits: Some(true),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn window() -> DateWindow {
        DateWindow::parse("2024-01-10", "2024-01-20").expect("window")
    }

    #[test]
    fn mention_query_serializes_project_and_range() {
        let body = serde_json::to_value(MentionQuery::new("proj-1", window()).to_clause()).unwrap();
        assert_eq!(
            body,
            json!({
                "bool": {
                    "must": [ { "match": { "projectId": "proj-1" } } ],
                    "filter": [
                        { "range": { "created_at": { "gte": "2024-01-10", "lt": "2024-01-20" } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn sentiment_adds_second_must_clause() {
        let query = MentionQuery::new("proj-1", window()).with_sentiment(Sentiment::Negative);
        let body = serde_json::to_value(query.to_clause()).unwrap();
        assert_eq!(
            body["bool"]["must"][1],
            json!({ "match": { "sentiment": "NEGATIVE" } })
        );
    }

    #[test]
    fn hits_request_sorts_by_followers_and_projects_fields() {
        let request = MentionQuery::new("proj-1", window())
            .sorted_by_followers()
            .hits_request(25, &["name", "followers_count"]);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["sort"], json!([{ "followers_count": "desc" }]));
        assert_eq!(body["size"], json!(25));
        assert_eq!(body["_source"], json!(["name", "followers_count"]));
        assert!(body.get("track_total_hits").is_none());
    }

    #[test]
    fn hits_request_without_fields_omits_source() {
        let request = MentionQuery::new("proj-1", window()).hits_request(10, &[]);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("_source").is_none());
        assert!(body.get("sort").is_none());
    }

    #[test]
    fn count_request_tracks_total_hits() {
        let body =
            serde_json::to_value(MentionQuery::new("proj-1", window()).count_request()).unwrap();
        assert_eq!(body["size"], json!(0));
        assert_eq!(body["track_total_hits"], json!(true));
    }

    #[test]
    fn match_all_count_serializes_empty_object() {
        let body = serde_json::to_value(SearchRequest::match_all_count()).unwrap();
        assert_eq!(body["query"], json!({ "match_all": {} }));
    }

    #[test]
    fn project_id_is_embedded_as_plain_string() {
        let hostile = r#"x" } }, { "match_all": {"#;
        let body = serde_json::to_value(MentionQuery::new(hostile, window()).to_clause()).unwrap();
        assert_eq!(body["bool"]["must"][0]["match"]["projectId"], json!(hostile));
    }
}

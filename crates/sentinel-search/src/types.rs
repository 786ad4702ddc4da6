//! Search-cluster response types.
//!
//! Only the parts of the `_search` response the analytics need are modelled;
//! everything else is ignored by serde.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub hits: Hits<T>,
}

#[derive(Debug, Deserialize)]
pub struct Hits<T> {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default = "Vec::new")]
    pub hits: Vec<Hit<T>>,
}

/// `hits.total`, which is an object on 7.x+ clusters and a bare number on
/// older ones.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Object { value: u64 },
    Legacy(u64),
}

impl TotalHits {
    #[must_use]
    pub fn value(self) -> u64 {
        match self {
            TotalHits::Object { value } | TotalHits::Legacy(value) => value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Hit<T> {
    #[serde(rename = "_source")]
    pub source: T,
}

impl<T> SearchResponse<T> {
    /// Exact total when the request tracked it, `0` otherwise.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.hits.total.map_or(0, TotalHits::value)
    }

    #[must_use]
    pub fn into_sources(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|hit| hit.source).collect()
    }
}

/// Banner returned by `GET /` on the cluster.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub version: Option<ClusterVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterVersion {
    pub number: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn total_accepts_object_form() {
        let body = json!({ "hits": { "total": { "value": 42, "relation": "eq" }, "hits": [] } });
        let parsed: SearchResponse<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.total(), 42);
    }

    #[test]
    fn total_accepts_legacy_number() {
        let body = json!({ "hits": { "total": 7, "hits": [] } });
        let parsed: SearchResponse<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.total(), 7);
    }

    #[test]
    fn missing_total_reads_as_zero() {
        let body = json!({ "hits": { "hits": [ { "_id": "1", "_source": { "a": 1 } } ] } });
        let parsed: SearchResponse<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.total(), 0);
        assert_eq!(parsed.into_sources(), vec![json!({ "a": 1 })]);
    }
}

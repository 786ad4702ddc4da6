use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::CoreError;

/// Sentiment label assigned to a mention at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Neutral,
    Positive,
    Negative,
}

impl Sentiment {
    /// Every label, in the order the dashboard expects buckets.
    pub const ALL: [Sentiment; 3] = [Sentiment::Neutral, Sentiment::Positive, Sentiment::Negative];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEUTRAL" => Ok(Sentiment::Neutral),
            "POSITIVE" => Ok(Sentiment::Positive),
            "NEGATIVE" => Ok(Sentiment::Negative),
            _ => Err(CoreError::UnknownSentiment(s.to_string())),
        }
    }
}

/// One indexed social post, as stored in the mention index.
///
/// Documents in the index are sparse; every field defaults when absent or
/// `null` so a single malformed document cannot fail a whole metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mention {
    #[serde(rename = "projectId", deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_image_url_https: String,
    #[serde(deserialize_with = "null_as_default")]
    pub statuses_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub full_text: String,
    /// Raw label; see [`Mention::sentiment`] for the parsed value.
    #[serde(rename = "sentiment", deserialize_with = "null_as_default")]
    pub sentiment_label: String,
    /// Creation timestamp exactly as indexed.
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Mention {
    #[must_use]
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment_label.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_parses_case_insensitively() {
        assert_eq!("positive".parse::<Sentiment>(), Ok(Sentiment::Positive));
        assert_eq!(" NEGATIVE ".parse::<Sentiment>(), Ok(Sentiment::Negative));
        assert!("mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn sentiment_serializes_uppercase() {
        let json = serde_json::to_string(&Sentiment::Neutral).unwrap();
        assert_eq!(json, "\"NEUTRAL\"");
    }

    #[test]
    fn mention_deserializes_sparse_document() {
        let doc = serde_json::json!({
            "projectId": "p-1",
            "full_text": "halo dunia",
            "sentiment": "POSITIVE",
            "created_at": "2024-01-10T08:00:00"
        });
        let mention: Mention = serde_json::from_value(doc).expect("sparse mention");
        assert_eq!(mention.project_id, "p-1");
        assert_eq!(mention.followers_count, 0);
        assert!(mention.screen_name.is_empty());
        assert_eq!(mention.sentiment(), Some(Sentiment::Positive));
    }

    #[test]
    fn mention_tolerates_null_fields() {
        let doc = serde_json::json!({
            "projectId": "p-1",
            "name": null,
            "followers_count": null,
            "statuses_count": 12,
            "full_text": null,
            "sentiment": null,
            "created_at": "2024-01-10T08:00:00"
        });
        let mention: Mention = serde_json::from_value(doc).expect("null fields default");
        assert_eq!(mention.followers_count, 0);
        assert_eq!(mention.statuses_count, 12);
        assert!(mention.name.is_empty());
        assert!(mention.full_text.is_empty());
        assert_eq!(mention.sentiment(), None);
        assert_eq!(mention.created_at, "2024-01-10T08:00:00");
    }
}

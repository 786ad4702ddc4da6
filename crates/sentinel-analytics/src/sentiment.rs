//! Per-label mention counts and the brand health score derived from them.

use std::collections::BTreeMap;

use sentinel_core::Sentiment;

use crate::frequency::FrequencyTable;

/// Mention counts for every sentiment label. Labels with no mentions are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub neutral: u64,
    pub positive: u64,
    pub negative: u64,
}

impl SentimentCounts {
    /// Reads each label out of `table`; absent labels count as zero.
    #[must_use]
    pub fn from_table(table: &FrequencyTable<Sentiment>) -> Self {
        Self {
            neutral: table.get(&Sentiment::Neutral),
            positive: table.get(&Sentiment::Positive),
            negative: table.get(&Sentiment::Negative),
        }
    }

    #[must_use]
    pub fn get(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
        }
    }

    /// Positive plus negative; neutral mentions are not counted.
    #[must_use]
    pub fn polarized(&self) -> u64 {
        self.positive.saturating_add(self.negative)
    }

    #[must_use]
    pub fn brand_health(&self) -> f64 {
        brand_health_score(self.positive, self.negative)
    }

    /// One single-entry table per label, in [`Sentiment::ALL`] order.
    #[must_use]
    pub fn tables(&self) -> Vec<BTreeMap<&'static str, u64>> {
        Sentiment::ALL
            .iter()
            .map(|s| BTreeMap::from([(s.as_str(), self.get(*s))]))
            .collect()
    }
}

/// Share of polarized mentions that are positive, in `[0, 1]`.
///
/// Returns `0.0` when there are no polarized mentions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn brand_health_score(positive: u64, negative: u64) -> f64 {
    let polarized = positive.saturating_add(negative);
    if polarized == 0 {
        return 0.0;
    }
    positive as f64 / polarized as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_polarized_mentions_scores_zero() {
        assert!(brand_health_score(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_is_positive_share() {
        assert!((brand_health_score(3, 1) - 0.75).abs() < f64::EPSILON);
        assert!((brand_health_score(0, 4)).abs() < f64::EPSILON);
        assert!((brand_health_score(4, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_labels_default_to_zero() {
        let table = FrequencyTable::count([Sentiment::Positive, Sentiment::Positive]);
        let counts = SentimentCounts::from_table(&table);
        assert_eq!(
            counts,
            SentimentCounts {
                neutral: 0,
                positive: 2,
                negative: 0,
            }
        );
    }

    #[test]
    fn polarized_excludes_neutral() {
        let counts = SentimentCounts {
            neutral: 100,
            positive: 3,
            negative: 1,
        };
        assert_eq!(counts.polarized(), 4);
        assert!((counts.brand_health() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn tables_follow_label_order() {
        let counts = SentimentCounts {
            neutral: 7,
            positive: 0,
            negative: 2,
        };
        let json = serde_json::to_value(counts.tables()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "NEUTRAL": 7 }, { "POSITIVE": 0 }, { "NEGATIVE": 2 }])
        );
    }
}

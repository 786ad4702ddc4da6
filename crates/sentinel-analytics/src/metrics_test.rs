use std::sync::Mutex;

use sentinel_core::Mention;

use super::*;
use crate::compare::Direction;

/// In-memory index: filters stored mentions the way the cluster would.
#[derive(Default)]
struct FakeSource {
    docs: Vec<Mention>,
    index_total: u64,
    fail: bool,
    queries: Mutex<Vec<MentionQuery>>,
}

impl FakeSource {
    fn with_docs(docs: Vec<Mention>) -> Self {
        let index_total = docs.len() as u64;
        Self {
            docs,
            index_total,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn matching(&self, query: &MentionQuery) -> Result<Vec<Mention>, SearchError> {
        self.queries
            .lock()
            .expect("queries lock")
            .push(query.clone());
        if self.fail {
            return Err(SearchError::UnexpectedStatus {
                status: 503,
                url: "http://fake/sentinel_index/_search".to_string(),
                body: String::new(),
            });
        }

        let start = query.window().start_param();
        let end = query.window().end_param();
        let mut hits: Vec<Mention> = self
            .docs
            .iter()
            .filter(|m| m.project_id == query.project_id())
            .filter(|m| query.sentiment().is_none_or(|s| m.sentiment() == Some(s)))
            .filter(|m| {
                let day = m.created_at.get(..10).unwrap_or_default();
                day >= start.as_str() && day < end.as_str()
            })
            .cloned()
            .collect();
        if !query.hits_request(0, &[]).sort.is_empty() {
            hits.sort_by(|a, b| b.followers_count.cmp(&a.followers_count));
        }
        Ok(hits)
    }

    fn recorded(&self) -> Vec<MentionQuery> {
        self.queries.lock().expect("queries lock").clone()
    }
}

impl MentionSource for FakeSource {
    async fn mentions(
        &self,
        query: &MentionQuery,
        _fields: &[&str],
    ) -> Result<Vec<Mention>, SearchError> {
        self.matching(query)
    }

    async fn count(&self, query: &MentionQuery) -> Result<u64, SearchError> {
        Ok(self.matching(query)?.len() as u64)
    }

    async fn count_all(&self) -> Result<u64, SearchError> {
        if self.fail {
            return Err(SearchError::UnexpectedStatus {
                status: 503,
                url: "http://fake/sentinel_index/_search".to_string(),
                body: String::new(),
            });
        }
        Ok(self.index_total)
    }
}

fn mention(project: &str, created_at: &str, sentiment: &str, text: &str) -> Mention {
    Mention {
        project_id: project.to_string(),
        created_at: created_at.to_string(),
        sentiment_label: sentiment.to_string(),
        full_text: text.to_string(),
        ..Mention::default()
    }
}

fn author(screen_name: &str, followers: u64) -> Mention {
    Mention {
        name: screen_name.to_uppercase(),
        screen_name: screen_name.to_string(),
        followers_count: followers,
        statuses_count: 10,
        favorite_count: 2,
        profile_image_url_https: format!("https://img.example/{screen_name}.png"),
        ..mention("proj-1", "2024-01-12T09:00:00", "NEUTRAL", "")
    }
}

fn scope() -> Scope {
    Scope::new(
        "proj-1",
        DateWindow::parse("2024-01-10", "2024-01-20").expect("window"),
    )
}

#[tokio::test]
async fn top_authors_sorted_by_followers_and_limited() {
    let source = FakeSource::with_docs(vec![
        author("sari", 40),
        author("budi", 1200),
        author("agus", 300),
    ]);

    let rows = top_authors(&source, &scope(), Some(2)).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.screen_name.as_str()).collect();
    assert_eq!(names, vec!["budi", "agus"]);
    assert_eq!(rows[0].name, "BUDI");
    assert_eq!(rows[0].profile_image_url_https, "https://img.example/budi.png");
}

#[tokio::test]
async fn top_authors_keeps_one_row_per_mention() {
    let source = FakeSource::with_docs(vec![author("budi", 5), author("budi", 5)]);
    let rows = top_authors(&source, &scope(), None).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn top_keywords_ranks_fixture_deterministically() {
    let source = FakeSource::with_docs(vec![
        mention(
            "proj-1",
            "2024-01-10T08:00:00",
            "NEGATIVE",
            "Aplikasi BankKita lambat, transfer gagal lagi!",
        ),
        mention(
            "proj-1",
            "2024-01-11T08:00:00",
            "NEGATIVE",
            "Transfer di aplikasi BankKita gagal hari ini",
        ),
        mention(
            "proj-1",
            "2024-01-12T08:00:00",
            "POSITIVE",
            "Layanan BankKita cepat dan ramah",
        ),
    ]);

    let rows = top_keywords(&source, &scope(), None).await.unwrap();
    let ranked: Vec<(&str, u64)> = rows.iter().map(|r| (r.word.as_str(), r.count)).collect();
    assert_eq!(
        ranked,
        vec![
            ("bankkita", 3),
            ("aplikasi", 2),
            ("transfer", 2),
            ("gagal", 2),
            ("lambat", 1),
            ("layanan", 1),
            ("cepat", 1),
            ("ramah", 1),
        ]
    );

    let top = top_keywords(&source, &scope(), Some(1)).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].word, "bankkita");
}

#[tokio::test]
async fn mentions_over_time_keys_by_raw_timestamp() {
    let source = FakeSource::with_docs(vec![
        mention("proj-1", "2024-01-11T08:00:00", "NEUTRAL", ""),
        mention("proj-1", "2024-01-10T08:00:00", "NEUTRAL", ""),
        mention("proj-1", "2024-01-11T08:00:00", "POSITIVE", ""),
        mention("proj-2", "2024-01-11T08:00:00", "POSITIVE", ""),
        mention("proj-1", "2024-01-20T00:00:00", "POSITIVE", ""),
    ]);

    let series = mentions_over_time(&source, &scope()).await.unwrap();
    let entries: Vec<(&str, u64)> = series.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(
        entries,
        vec![("2024-01-10T08:00:00", 1), ("2024-01-11T08:00:00", 2)]
    );
}

#[tokio::test]
async fn mentions_by_sentiment_fills_missing_labels() {
    let source = FakeSource::with_docs(vec![
        mention("proj-1", "2024-01-11", "NEUTRAL", ""),
        mention("proj-1", "2024-01-12", "NEUTRAL", ""),
        mention("proj-1", "2024-01-13", "NEGATIVE", ""),
    ]);

    let tables = mentions_by_sentiment(&source, &scope()).await.unwrap();
    assert_eq!(
        serde_json::to_value(&tables).unwrap(),
        serde_json::json!([{ "NEUTRAL": 2 }, { "POSITIVE": 0 }, { "NEGATIVE": 1 }])
    );
    assert_eq!(source.recorded().len(), 3);
}

#[tokio::test]
async fn brand_health_uses_polarized_share() {
    let source = FakeSource::with_docs(vec![
        mention("proj-1", "2024-01-11", "POSITIVE", ""),
        mention("proj-1", "2024-01-11", "POSITIVE", ""),
        mention("proj-1", "2024-01-11", "POSITIVE", ""),
        mention("proj-1", "2024-01-11", "NEGATIVE", ""),
        mention("proj-1", "2024-01-11", "NEUTRAL", ""),
    ]);

    let health = brand_health(&source, &scope()).await.unwrap();
    assert!((health.score - 0.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn brand_health_without_polarized_mentions_is_zero() {
    let source = FakeSource::with_docs(vec![mention("proj-1", "2024-01-11", "NEUTRAL", "")]);
    let health = brand_health(&source, &scope()).await.unwrap();
    assert!(health.score.abs() < f64::EPSILON);
}

#[tokio::test]
async fn result_summary_compares_against_prior_window() {
    let mut docs = vec![
        // Current window: 3 positive, 2 negative, 4 neutral.
        mention("proj-1", "2024-01-10", "POSITIVE", ""),
        mention("proj-1", "2024-01-15", "POSITIVE", ""),
        mention("proj-1", "2024-01-19", "POSITIVE", ""),
        mention("proj-1", "2024-01-12", "NEGATIVE", ""),
        mention("proj-1", "2024-01-13", "NEGATIVE", ""),
        // Prior window (2023-12-31..2024-01-10): 1 positive, 4 negative.
        mention("proj-1", "2023-12-31", "POSITIVE", ""),
        mention("proj-1", "2024-01-01", "NEGATIVE", ""),
        mention("proj-1", "2024-01-05", "NEGATIVE", ""),
        mention("proj-1", "2024-01-08", "NEGATIVE", ""),
        mention("proj-1", "2024-01-09", "NEGATIVE", ""),
    ];
    docs.extend((0..4).map(|_| mention("proj-1", "2024-01-14", "NEUTRAL", "")));
    let source = FakeSource {
        index_total: 12_345,
        ..FakeSource::with_docs(docs)
    };

    let summary = result_summary(&source, &scope()).await.unwrap();
    assert_eq!(summary.total, 12_345);
    assert_eq!(summary.positive, 3);
    assert_eq!(summary.negative, 2);
    assert_eq!(summary.total_direction, Direction::Same);
    assert_eq!(summary.total_percent, Some(0.0));
    assert_eq!(summary.positive_direction, Direction::Up);
    assert_eq!(summary.positive_percent, Some(200.0));
    assert_eq!(summary.negative_direction, Direction::Down);
    assert_eq!(summary.negative_percent, Some(50.0));

    let windows: Vec<String> = source
        .recorded()
        .iter()
        .map(|q| q.window().start_param())
        .collect();
    assert_eq!(windows.len(), 6);
    assert_eq!(windows.iter().filter(|w| *w == "2023-12-31").count(), 3);
}

#[tokio::test]
async fn result_summary_with_empty_prior_has_null_percent() {
    let source = FakeSource::with_docs(vec![mention("proj-1", "2024-01-11", "NEGATIVE", "")]);
    let summary = result_summary(&source, &scope()).await.unwrap();

    assert_eq!(summary.negative_direction, Direction::Up);
    assert_eq!(summary.negative_percent, None);
    assert_eq!(summary.positive_direction, Direction::Same);
    assert_eq!(summary.positive_percent, None);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["totalDirection"], "Up");
    assert!(json["totalPercent"].is_null());
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn any_failed_sub_query_fails_the_metric() {
    let source = FakeSource::failing();
    let err = result_summary(&source, &scope()).await.unwrap_err();
    assert!(matches!(err, SearchError::UnexpectedStatus { status: 503, .. }));

    assert!(brand_health(&source, &scope()).await.is_err());
    assert!(top_keywords(&source, &scope(), None).await.is_err());
}

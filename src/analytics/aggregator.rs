//! Aggregator
//!
//! Read path: load log → popular view + recent view → summary.
//!
//! Aggregation never fails. A log that cannot be read aggregates as an empty
//! one, so dashboards always receive a well-formed summary.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::storage::{EventLog, EventStore, SearchEvent};

/// Default length of both views
pub const DEFAULT_VIEW_LIMIT: usize = 10;

/// A query and how many times it was searched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopularSearch {
    pub query: String,
    pub count: usize,
}

/// Derived views over the event log
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Every event in the log, empty queries included
    pub total_searches: usize,
    /// Most frequent non-empty queries, count descending
    pub popular_searches: Vec<PopularSearch>,
    /// Latest occurrence of each distinct non-empty query, newest first
    pub recent_searches: Vec<SearchEvent>,
}

/// Lengths of the derived views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimits {
    pub popular: usize,
    pub recent: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            popular: DEFAULT_VIEW_LIMIT,
            recent: DEFAULT_VIEW_LIMIT,
        }
    }
}

/// Computes summaries from the persisted log
pub struct Aggregator {
    store: Arc<dyn EventStore>,
    limits: ViewLimits,
}

impl Aggregator {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            limits: ViewLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ViewLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> ViewLimits {
        self.limits
    }

    /// Load the log and summarize it
    pub async fn aggregate(&self) -> AnalyticsSummary {
        let log = self.store.load_or_empty().await;
        let summary = summarize(&log, self.limits);

        tracing::debug!(
            total = summary.total_searches,
            popular = summary.popular_searches.len(),
            recent = summary.recent_searches.len(),
            "Aggregated search analytics"
        );

        summary
    }
}

/// Build both views over `log`
pub fn summarize(log: &EventLog, limits: ViewLimits) -> AnalyticsSummary {
    AnalyticsSummary {
        total_searches: log.len(),
        popular_searches: popular_searches(log.events(), limits.popular),
        recent_searches: recent_searches(log, limits.recent),
    }
}

/// Rank non-empty queries by exact-match frequency
///
/// Equal counts keep the order in which the queries were first seen.
pub fn popular_searches(events: &[SearchEvent], limit: usize) -> Vec<PopularSearch> {
    let mut ranked: Vec<PopularSearch> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for event in events.iter().filter(|e| e.has_query()) {
        match slots.get(event.query.as_str()) {
            Some(&slot) => ranked[slot].count += 1,
            None => {
                slots.insert(event.query.as_str(), ranked.len());
                ranked.push(PopularSearch {
                    query: event.query.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable: ties stay in first-seen order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Most recent occurrence of each distinct non-empty query, newest first
pub fn recent_searches(log: &EventLog, limit: usize) -> Vec<SearchEvent> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut recent = Vec::new();

    for event in log.newest_first() {
        if recent.len() >= limit {
            break;
        }
        if event.has_query() && seen.insert(event.query.as_str()) {
            recent.push(event.clone());
        }
    }

    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::EventRecorder;
    use crate::storage::{JsonFileStore, MemoryStore, NewSearchEvent};
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;

    /// Build a log whose timestamps advance one second per event
    fn log_of(queries: &[&str]) -> EventLog {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        EventLog::from_events(
            queries
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    NewSearchEvent::new(*q, i as u64).into_event_at(base + Duration::seconds(i as i64))
                })
                .collect(),
        )
    }

    fn popular(pairs: &[(&str, usize)]) -> Vec<PopularSearch> {
        pairs
            .iter()
            .map(|(q, c)| PopularSearch {
                query: q.to_string(),
                count: *c,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_cats_dogs_scenario() {
        let store = Arc::new(MemoryStore::new());
        let recorder = EventRecorder::new(store.clone());
        let aggregator = Aggregator::new(store.clone());

        recorder.record(NewSearchEvent::new("cats", 3)).await.unwrap();
        recorder.record(NewSearchEvent::new("dogs", 1)).await.unwrap();
        let third = recorder.record(NewSearchEvent::new("cats", 5)).await.unwrap();

        let summary = aggregator.aggregate().await;

        assert_eq!(summary.total_searches, 3);
        assert_eq!(summary.popular_searches, popular(&[("cats", 2), ("dogs", 1)]));
        assert_eq!(summary.recent_searches.len(), 2);
        assert_eq!(summary.recent_searches[0], third);
        assert_eq!(summary.recent_searches[0].result_count, 5);
        assert_eq!(summary.recent_searches[1].query, "dogs");
    }

    #[tokio::test]
    async fn test_missing_file_yields_zero_summary() {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("absent.json")));

        let summary = Aggregator::new(store).aggregate().await;
        assert_eq!(summary, AnalyticsSummary::default());
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_zero_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "]]").unwrap();

        let summary = Aggregator::new(Arc::new(JsonFileStore::new(&path))).aggregate().await;
        assert_eq!(summary.total_searches, 0);
        assert!(summary.popular_searches.is_empty());
        assert!(summary.recent_searches.is_empty());
    }

    #[tokio::test]
    async fn test_total_matches_recorded_count() {
        for n in [0usize, 1, 9, 10, 11, 250] {
            let store = Arc::new(MemoryStore::new());
            let recorder = EventRecorder::new(store.clone());
            for i in 0..n {
                recorder.record(NewSearchEvent::new(format!("q{}", i % 7), 0)).await.unwrap();
            }

            let summary = Aggregator::new(store).aggregate().await;
            assert_eq!(summary.total_searches, n);
        }
    }

    #[tokio::test]
    async fn test_evicted_query_absent_from_views() {
        let store = Arc::new(MemoryStore::new());
        let recorder = EventRecorder::new(store.clone());
        for i in 0..=1000 {
            recorder.record(NewSearchEvent::new(format!("q{}", i), 0)).await.unwrap();
        }

        let aggregator = Aggregator::new(store.clone()).with_limits(ViewLimits {
            popular: usize::MAX,
            recent: usize::MAX,
        });
        let summary = aggregator.aggregate().await;

        assert_eq!(summary.total_searches, 1000);
        assert!(summary.popular_searches.iter().all(|p| p.query != "q0"));
        assert!(summary.recent_searches.iter().all(|e| e.query != "q0"));
        assert_eq!(summary.recent_searches[0].query, "q1000");
    }

    #[test]
    fn test_popular_sorted_with_first_seen_ties() {
        let log = log_of(&["b", "a", "c", "a", "b", "d", "c", "e"]);
        let ranked = popular_searches(log.events(), 10);

        assert_eq!(
            ranked,
            popular(&[("b", 2), ("a", 2), ("c", 2), ("d", 1), ("e", 1)])
        );
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_popular_truncates_to_limit() {
        let queries: Vec<String> = (0..15).map(|i| format!("q{}", i)).collect();
        let refs: Vec<&str> = queries.iter().map(String::as_str).collect();
        let log = log_of(&refs);

        let ranked = popular_searches(log.events(), 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].query, "q0");
        assert_eq!(ranked[9].query, "q9");
    }

    #[test]
    fn test_popular_is_case_sensitive() {
        let log = log_of(&["Cats", "cats", "cats ", "cats"]);
        let ranked = popular_searches(log.events(), 10);
        assert_eq!(ranked, popular(&[("cats", 2), ("Cats", 1), ("cats ", 1)]));
    }

    #[test]
    fn test_recent_keeps_latest_occurrence() {
        let log = log_of(&["a", "b", "a", "c", "b"]);
        let recent = recent_searches(&log, 10);

        let queries: Vec<&str> = recent.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["b", "c", "a"]);
        // each entry is that query's newest event
        assert_eq!(recent[0], log.events()[4]);
        assert_eq!(recent[1], log.events()[3]);
        assert_eq!(recent[2], log.events()[2]);
    }

    #[test]
    fn test_recent_truncates_to_limit() {
        let queries: Vec<String> = (0..25).map(|i| format!("q{}", i)).collect();
        let refs: Vec<&str> = queries.iter().map(String::as_str).collect();
        let log = log_of(&refs);

        let recent = recent_searches(&log, 10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].query, "q24");
        assert_eq!(recent[9].query, "q15");
    }

    #[test]
    fn test_recent_distinct_and_newest_first() {
        let pattern = ["x", "y", "x", "z", "z", "y", "w", "x"];
        let log = log_of(&pattern);
        let recent = recent_searches(&log, 10);

        let distinct: HashSet<&str> = recent.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(distinct.len(), recent.len());
        assert!(recent.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn test_empty_queries_only_count_toward_total() {
        let log = log_of(&["", "shoes", "", "", "shoes"]);
        let summary = summarize(&log, ViewLimits::default());

        assert_eq!(summary.total_searches, 5);
        assert_eq!(summary.popular_searches, popular(&[("shoes", 2)]));
        assert_eq!(summary.recent_searches.len(), 1);
        assert!(summary.recent_searches.iter().all(|e| !e.query.is_empty()));
    }

    #[test]
    fn test_all_empty_queries() {
        let log = log_of(&["", ""]);
        let summary = summarize(&log, ViewLimits::default());

        assert_eq!(summary.total_searches, 2);
        assert!(summary.popular_searches.is_empty());
        assert!(summary.recent_searches.is_empty());
    }

    #[test]
    fn test_zero_limits() {
        let log = log_of(&["a", "b"]);
        let summary = summarize(&log, ViewLimits { popular: 0, recent: 0 });

        assert_eq!(summary.total_searches, 2);
        assert!(summary.popular_searches.is_empty());
        assert!(summary.recent_searches.is_empty());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let log = log_of(&["cats"]);
        let json = serde_json::to_value(summarize(&log, ViewLimits::default())).unwrap();

        assert_eq!(json["totalSearches"], 1);
        assert_eq!(json["popularSearches"][0]["query"], "cats");
        assert_eq!(json["popularSearches"][0]["count"], 1);
        assert_eq!(json["recentSearches"][0]["query"], "cats");
        assert!(json["recentSearches"][0]["timestamp"].is_string());
    }
}

//! Core data types for the search analytics store
//!
//! - `SearchEvent`: one observed query submission, as persisted
//! - `NewSearchEvent`: a submission before the recorder assigns identity
//! - `EventLog`: the bounded, insertion-ordered sequence of events

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Default retention bound for the event log
pub const DEFAULT_MAX_EVENTS: usize = 1000;

/// A single recorded search
///
/// Immutable once created. `id` and `timestamp` are only ever assigned
/// by the recorder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent {
    /// Random v4 identifier
    pub id: String,
    /// Literal search text, may be empty
    pub query: String,
    /// Ingestion time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Opaque filter mapping, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    /// Number of results shown for the query
    pub result_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl SearchEvent {
    /// True when the event carries a query worth surfacing in views
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

/// A search submission that has not been recorded yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSearchEvent {
    pub query: String,
    pub result_count: u64,
    pub filters: Option<Map<String, Value>>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
}

impl NewSearchEvent {
    pub fn new(query: impl Into<String>, result_count: u64) -> Self {
        Self {
            query: query.into(),
            result_count,
            ..Default::default()
        }
    }

    /// Builder method: add a filter entry
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builder method: set the whole filter mapping
    pub fn filters(mut self, filters: Map<String, Value>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Stamp with a fresh id and the given time
    pub fn into_event_at(self, timestamp: DateTime<Utc>) -> SearchEvent {
        SearchEvent {
            id: Uuid::new_v4().to_string(),
            query: self.query,
            timestamp: timestamp.trunc_subsecs(3),
            filters: self.filters,
            result_count: self.result_count,
            session_id: self.session_id,
            user_agent: self.user_agent,
        }
    }

    /// Stamp with a fresh id and the current wall-clock time
    pub fn into_event(self) -> SearchEvent {
        self.into_event_at(Utc::now())
    }
}

/// The full persisted sequence of search events, oldest first
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<SearchEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SearchEvent> {
        self.events
    }

    /// Most recently appended event
    pub fn last(&self) -> Option<&SearchEvent> {
        self.events.last()
    }

    /// Append an event, then evict from the head until `len <= max_events`
    ///
    /// Returns the number of evicted events.
    pub fn push_bounded(&mut self, event: SearchEvent, max_events: usize) -> usize {
        self.events.push(event);
        self.retain_newest(max_events)
    }

    /// Drop the oldest events so at most `max_events` remain
    pub fn retain_newest(&mut self, max_events: usize) -> usize {
        let excess = self.events.len().saturating_sub(max_events);
        if excess > 0 {
            self.events.drain(..excess);
        }
        excess
    }

    /// Iterate newest to oldest
    pub fn newest_first(&self) -> impl Iterator<Item = &SearchEvent> {
        self.events.iter().rev()
    }
}

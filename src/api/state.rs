//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{Aggregator, EventRecorder};
use crate::config::{ApiConfig, Config};
use crate::storage::EventStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend holding the event log
    pub store: Arc<dyn EventStore>,
    /// Write path
    pub recorder: Arc<EventRecorder>,
    /// Read path
    pub aggregator: Arc<Aggregator>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Wire the recorder and aggregator over `store` using `config`
    pub fn new(store: Arc<dyn EventStore>, config: &Config) -> Self {
        let recorder =
            EventRecorder::new(Arc::clone(&store)).with_max_events(config.storage.max_events);
        let aggregator =
            Aggregator::new(Arc::clone(&store)).with_limits(config.analytics.view_limits());

        Self {
            store,
            recorder: Arc::new(recorder),
            aggregator: Arc::new(aggregator),
            config: Arc::new(config.api.clone()),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

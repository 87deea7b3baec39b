//! Event Recorder
//!
//! Write path: NewSearchEvent → stamp id/timestamp → load log → append →
//! evict past the cap → save whole log.
//!
//! Overlapping `record` calls on the same recorder are serialized by an
//! async writer lock, so a load-modify-save cycle never clobbers a
//! concurrent append from this process. Separate processes writing the same
//! file are not coordinated.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::{EventStore, NewSearchEvent, SearchEvent, StorageResult, DEFAULT_MAX_EVENTS};

/// Appends search events to a bounded, persisted log
pub struct EventRecorder {
    store: Arc<dyn EventStore>,
    max_events: usize,
    write_lock: Mutex<()>,
}

impl EventRecorder {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            max_events: DEFAULT_MAX_EVENTS,
            write_lock: Mutex::new(()),
        }
    }

    /// Builder: set the retention bound (minimum 1)
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events.max(1);
        self
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    /// Record one search event and return it as stored
    ///
    /// An unreadable log is replaced by an empty one. A failed save is
    /// returned to the caller and nothing is retried.
    pub async fn record(&self, event: NewSearchEvent) -> StorageResult<SearchEvent> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.store.load_or_empty().await;
        let event = event.into_event();
        let evicted = log.push_bounded(event.clone(), self.max_events);

        if let Err(e) = self.store.save(&log).await {
            tracing::error!(
                store = %self.store.describe(),
                error = %e,
                "Failed to persist search event"
            );
            return Err(e);
        }

        tracing::debug!(
            event_id = %event.id,
            query = %event.query,
            log_len = log.len(),
            evicted,
            "Recorded search event"
        );

        Ok(event)
    }
}

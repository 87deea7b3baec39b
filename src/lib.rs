//! # Search Analytics
//!
//! Records search queries issued against a product search feature and serves
//! aggregate views over them.
//!
//! ## Features
//!
//! - **Bounded event log**: one JSON file, oldest events evicted past the cap
//! - **Popular searches**: frequency ranking with first-seen tie-breaking
//! - **Recent searches**: latest occurrence of each distinct query
//! - **Never-failing reads**: an unreadable log aggregates as empty
//!
//! ## Modules
//!
//! - [`storage`]: Event types and the `EventStore` backends
//! - [`analytics`]: Event recorder and aggregator
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use search_analytics::analytics::{Aggregator, EventRecorder};
//! use search_analytics::storage::{JsonFileStore, NewSearchEvent};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(JsonFileStore::new("./data/search-analytics.json"));
//!     let recorder = EventRecorder::new(store.clone());
//!     let aggregator = Aggregator::new(store);
//!
//!     recorder.record(NewSearchEvent::new("cats", 3)).await?;
//!
//!     let summary = aggregator.aggregate().await;
//!     println!("{} searches recorded", summary.total_searches);
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    EventLog, EventStore, JsonFileStore, MemoryStore, NewSearchEvent, SearchEvent, StorageError,
    StorageResult,
};

pub use analytics::{AnalyticsSummary, Aggregator, EventRecorder, PopularSearch, ViewLimits};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    AnalyticsConfig, ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig,
};

//! Search event storage
//!
//! - **types**: `SearchEvent`, `NewSearchEvent`, `EventLog`
//! - **store**: `EventStore` trait with JSON-file and in-memory backends
//! - **error**: Error types
//!
//! The log is always loaded and saved whole. Nothing is cached between calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use search_analytics::storage::{EventLog, EventStore, JsonFileStore, NewSearchEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileStore::new("./data/search-analytics.json");
//!
//!     let mut log = store.load_or_empty().await;
//!     log.push_bounded(NewSearchEvent::new("cats", 3).into_event(), 1000);
//!     store.save(&log).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::{EventStore, JsonFileStore, MemoryStore};
pub use types::{EventLog, NewSearchEvent, SearchEvent, DEFAULT_MAX_EVENTS};

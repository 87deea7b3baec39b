//! Search analytics
//!
//! ```text
//! Record:    NewSearchEvent → EventRecorder → load → append → evict → save
//! Aggregate: Aggregator → load → popular view + recent view → AnalyticsSummary
//! ```
//!
//! Both sides share nothing but the `EventStore`.

pub mod aggregator;
pub mod recorder;

pub use aggregator::{
    popular_searches, recent_searches, summarize, AnalyticsSummary, Aggregator, PopularSearch,
    ViewLimits, DEFAULT_VIEW_LIMIT,
};
pub use recorder::EventRecorder;

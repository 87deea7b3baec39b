//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analytics;
pub mod health;

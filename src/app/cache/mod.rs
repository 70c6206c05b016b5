//! Cache module for the top stories service.
//!
//! This module provides the caching actor that sits between the query layer
//! and the remote story API:
//! - **Story Cache Actor**: holds the aggregated top-story collection in a
//!   single time-limited entry and repopulates it on expiry

pub mod stories;

// Re-export the main cache actor
pub use stories::StoryCache;

// Re-export mock data types for testing
pub use stories::MockData as StoryMockData;

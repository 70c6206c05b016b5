//! Application-level subsystems: configuration, the story cache and the
//! query layer that sits between the HTTP boundary and the cache.

pub mod cache;
pub mod config;
pub mod query;

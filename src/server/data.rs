//! Wire types of the HTTP boundary.
//!
//! Field names follow the frontend convention, so `page_size` travels as
//! `pageSize` and `total_pages` as `totalPages`.

use serde::{Deserialize, Serialize};

use crate::api::hn::Story;

/// Query parameters accepted by the story listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoriesParams {
    /// Case-insensitive substring to match against story titles
    #[serde(default)]
    pub search: Option<String>,
    /// 1-based page number, defaulting to the first page
    #[serde(default)]
    pub page: Option<i64>,
    /// Stories per page, defaulting to the configured page size
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Body of a successful story listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoriesResponse {
    /// The requested page of stories
    pub stories: Vec<Story>,
    /// Total number of pages the match set spans
    pub total_pages: u64,
}

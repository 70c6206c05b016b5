//! Read-side queries over the cached story collection.
//!
//! Queries never mutate the cache. They filter and slice whatever collection
//! the cache serves, so repeated calls with the same parameters return the
//! same page until the cache repopulates.

use thiserror::Error;

use crate::api::hn::Story;
use crate::app::cache::StoryCache;

/// Failure modes of a story query
#[derive(Debug, Error)]
pub enum QueryError {
    /// The caller asked for a non-positive page size. The message is safe to
    /// show to end users.
    #[error("Page size must be greater than zero.")]
    InvalidPageSize,
    /// The story collection could not be read
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Parameters of a story listing request
#[derive(Debug, Clone)]
pub struct StoryQuery {
    /// Case-insensitive substring to match against titles. `None` or an empty
    /// string matches every story.
    pub search: Option<String>,
    /// 1-based page number. Values below 1 are treated as 1.
    pub page: i64,
    /// Number of stories per page. Must be positive.
    pub page_size: i64,
}

/// One page of matching stories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPage {
    /// The slice of the match set selected by `page` and `page_size`
    pub stories: Vec<Story>,
    /// How many stories matched the search before pagination
    pub total_matches: usize,
}

/// Runs a listing query against the cached story collection.
///
/// The page size is validated before the cache is touched, so an invalid
/// request never triggers a remote fetch.
///
/// # Errors
/// [`QueryError::InvalidPageSize`] if `page_size` is zero or negative, and
/// [`QueryError::Internal`] if the cache fails to serve the collection.
pub async fn top_stories(
    cache: &StoryCache,
    query: &StoryQuery,
) -> Result<StoryPage, QueryError> {
    if query.page_size <= 0 {
        return Err(QueryError::InvalidPageSize);
    }

    let stories = cache.get().await?;

    let matching: Vec<Story> = match query.search.as_deref() {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            stories
                .iter()
                .filter(|story| story.title.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        _ => stories.to_vec(),
    };

    let total_matches = matching.len();
    let page = query.page.max(1) as usize;
    let page_size = query.page_size as usize;
    let offset = (page - 1).saturating_mul(page_size);
    let stories = matching.into_iter().skip(offset).take(page_size).collect();

    Ok(StoryPage {
        stories,
        total_matches,
    })
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ArcStr;

/// Wire representation of an item as returned by the remote story API.
///
/// Every field may be null or absent in the remote JSON, so they are all
/// optional here. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// The item's unique ID
    #[serde(default)]
    pub id: Option<u64>,
    /// The story title
    #[serde(default)]
    pub title: Option<String>,
    /// The URL of the story
    #[serde(default)]
    pub url: Option<String>,
}

/// A normalized story ready to be served.
///
/// Missing wire fields normalize to `0` and the empty string. Stories missing
/// a title or URL are dropped during aggregation, so served stories always
/// have both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// The story's unique ID
    pub id: u64,
    /// The story title
    pub title: ArcStr,
    /// The URL of the story
    pub url: ArcStr,
}

impl Story {
    /// Stands in for a story whose detail fetch failed. Placeholders are
    /// filtered out before the collection is served.
    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            title: ArcStr::default(),
            url: ArcStr::default(),
        }
    }

    /// True when both the title and the URL are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: record.id.unwrap_or(0),
            title: record.title.map(ArcStr::from).unwrap_or_default(),
            url: record.url.map(ArcStr::from).unwrap_or_default(),
        }
    }
}

/// Canned responses backing a mock story client.
#[derive(Debug, Clone, Default)]
pub struct MockData {
    /// IDs returned by the index endpoint, in ranking order
    pub top_story_ids: Vec<u64>,
    /// Records returned by the item endpoint, keyed by ID
    pub stories: HashMap<u64, StoryRecord>,
}

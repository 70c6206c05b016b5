use tokio::sync::oneshot::Sender;

use super::data::StoryRecord;
use crate::ArcSlice;

/// Messages that can be sent to the HackerNews API actor.
///
/// This enum defines the different remote operations that can be performed
/// through the API actor system.
#[derive(Debug)]
pub enum HnApiMessage {
    /// Fetches the list of top story IDs from the index endpoint
    FetchTopStoryIds {
        /// Response channel for the operation result
        tx: Sender<anyhow::Result<ArcSlice<u64>>>,
    },
    /// Fetches a single story record from the item endpoint
    FetchStory {
        /// The story ID to fetch
        id: u64,
        /// Response channel for the operation result
        tx: Sender<anyhow::Result<StoryRecord>>,
    },
}

use anyhow::Context;
use tokio::task::JoinHandle;

use super::data::StoryRecord;
use crate::ArcSlice;
use crate::{ArcStr, api::hn::message::HnApiMessage, net::Net};

/// The core of the HackerNews API system that handles API-specific HTTP requests.
///
/// This struct provides thread-safe access to the remote story API through an
/// actor pattern. It wraps the networking actor and provides domain-specific
/// methods for the index and item endpoints.
///
/// # Features
/// - Domain-specific URL construction and response parsing
/// - Integration with the networking system
/// - Proper error handling and context
///
/// # Examples
/// ```ignore
/// let core = Core::new(net);
/// let (api, _) = core.spawn();
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads through the actor
/// pattern. Requests are dispatched on their own tasks, so a batch of item
/// fetches runs concurrently instead of queueing behind one another.
#[derive(Debug)]
pub struct Core {
    /// The networking actor for making HTTP requests
    net: Net,
    /// The base URL for API requests
    base_url: ArcStr,
}

impl Core {
    /// Creates a new API core instance.
    ///
    /// # Arguments
    /// * `net` - The networking actor for making HTTP requests
    ///
    /// # Returns
    /// A new instance of `Core` configured for the public HackerNews API.
    pub fn new(net: Net) -> Self {
        Self {
            net,
            base_url: ArcStr::from("https://hacker-news.firebaseio.com"),
        }
    }

    /// Creates a new API core instance with a custom base URL.
    ///
    /// # Arguments
    /// * `net` - The networking actor for making HTTP requests
    /// * `base_url` - The base URL for API requests, without a trailing slash
    ///
    /// # Returns
    /// A new instance of `Core` configured with the specified base URL.
    pub fn with_base_url(net: Net, base_url: ArcStr) -> Self {
        Self { net, base_url }
    }

    /// Transforms the API core instance into an actor.
    ///
    /// This method spawns a new task that will handle API operations
    /// asynchronously through a message channel. Each operation is dispatched
    /// on its own task; the mailbox only routes.
    ///
    /// # Returns
    /// A tuple containing:
    /// - The `HnApi` interface
    /// - A join handle for the spawned task
    pub fn spawn(self) -> (crate::api::hn::HnApi, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(100);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    HnApiMessage::FetchTopStoryIds { tx } => {
                        let net = self.net.clone();
                        let base_url = self.base_url.clone();
                        tokio::spawn(async move {
                            let response = Self::handle_fetch_top_story_ids(net, base_url)
                                .await
                                .context("Fetching the top story ID list");
                            let _ = tx.send(response);
                        });
                    }
                    HnApiMessage::FetchStory { id, tx } => {
                        let net = self.net.clone();
                        let base_url = self.base_url.clone();
                        tokio::spawn(async move {
                            let response = Self::handle_fetch_story(net, base_url, id)
                                .await
                                .with_context(|| format!("Fetching story {}", id));
                            let _ = tx.send(response);
                        });
                    }
                }
            }
        });

        (crate::api::hn::HnApi::Actual(tx), handle)
    }

    /// Handles index requests and parses the body as a JSON array of IDs.
    async fn handle_fetch_top_story_ids(
        net: Net,
        base_url: ArcStr,
    ) -> anyhow::Result<ArcSlice<u64>> {
        let url = format!("{}/v0/topstories.json", base_url);

        let body = net.get(ArcStr::from(url.as_str())).await?;
        let ids: Vec<u64> =
            serde_json::from_str(body.as_ref()).context("Parsing the story ID list")?;

        Ok(ArcSlice::from(&ids[..]))
    }

    /// Handles item requests and parses the body as a story record.
    ///
    /// The remote API answers `null` for IDs that do not exist; that is
    /// reported as an error so callers can substitute a placeholder.
    async fn handle_fetch_story(net: Net, base_url: ArcStr, id: u64) -> anyhow::Result<StoryRecord> {
        let url = format!("{}/v0/item/{}.json", base_url, id);

        let body = net.get(ArcStr::from(url.as_str())).await?;
        let record: Option<StoryRecord> =
            serde_json::from_str(body.as_ref()).context("Parsing the story record")?;

        record.ok_or_else(|| anyhow::anyhow!("Story {} does not exist", id))
    }
}

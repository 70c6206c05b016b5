use anyhow::Context;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc::Sender, oneshot};

use crate::utils::ArcSlice;
use crate::net::Net;

mod core;
pub mod data;
mod message;

// Re-export public types for external use
pub use data::{MockData, Story, StoryRecord};
pub use message::HnApiMessage;

/// The HackerNews API actor that provides a high-level interface for the remote story API.
///
/// This actor intermediates calls to the networking actor, providing domain-specific
/// methods for fetching the top story index and individual story records.
///
/// # Examples
/// ```ignore
/// let api = HnApi::spawn(net);
/// let ids = api.fetch_top_story_ids().await?;
/// let story = api.fetch_story(ids[0]).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum HnApi {
    /// A real API actor that performs HTTP requests through the networking actor
    Actual(Sender<HnApiMessage>),
    /// A mock implementation for testing
    Mock(Arc<Mutex<MockData>>),
}

#[allow(dead_code)]
impl HnApi {
    /// Creates a new HackerNews API actor and spawns its core.
    ///
    /// # Arguments
    /// * `net` - The networking actor for making HTTP requests
    ///
    /// # Returns
    /// A new API actor configured for the public HackerNews API.
    pub fn spawn(net: Net) -> Self {
        let (api, _) = core::Core::new(net).spawn();
        api
    }

    /// Creates a new HackerNews API actor with a custom base URL.
    ///
    /// # Arguments
    /// * `net` - The networking actor for making HTTP requests
    /// * `base_url` - The base URL for API requests, without a trailing slash
    ///
    /// # Returns
    /// A new API actor configured with the specified base URL.
    pub fn spawn_with_base_url(net: Net, base_url: crate::ArcStr) -> Self {
        let (api, _) = core::Core::with_base_url(net, base_url).spawn();
        api
    }

    /// Creates a new mock API instance for testing.
    ///
    /// # Arguments
    /// * `data` - Canned index and item responses
    ///
    /// # Returns
    /// A new mock API instance that returns predefined responses.
    pub fn mock(data: MockData) -> Self {
        Self::Mock(Arc::new(Mutex::new(data)))
    }

    /// Creates a new empty mock API instance for testing.
    ///
    /// # Returns
    /// A new mock API instance with an empty index and no items.
    pub fn mock_empty() -> Self {
        Self::Mock(Arc::new(Mutex::new(MockData::default())))
    }

    /// Fetches the list of top story IDs from the index endpoint.
    ///
    /// The index is returned in ranking order. The caller decides how many
    /// of the IDs to resolve into full records.
    ///
    /// # Returns
    /// The story IDs in ranking order, or an error if the request fails or
    /// the body is not a JSON array of integers.
    pub async fn fetch_top_story_ids(&self) -> Result<ArcSlice<u64>, anyhow::Error> {
        match self {
            HnApi::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(HnApiMessage::FetchTopStoryIds { tx })
                    .await
                    .context("Sending message to HnApi actor")
                    .expect("HnApi actor died");
                rx.await
                    .context("Receiving response from HnApi actor")
                    .expect("HnApi actor died")
            }
            HnApi::Mock(data) => {
                let data = data.lock().await;
                Ok(ArcSlice::from(&data.top_story_ids[..]))
            }
        }
    }

    /// Fetches a single story record from the item endpoint.
    ///
    /// # Arguments
    /// * `id` - The story ID to fetch
    ///
    /// # Returns
    /// The raw story record, or an error if the request fails, the body is
    /// malformed, or the item does not exist (the remote API answers `null`).
    pub async fn fetch_story(&self, id: u64) -> Result<StoryRecord, anyhow::Error> {
        match self {
            HnApi::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(HnApiMessage::FetchStory { id, tx })
                    .await
                    .context("Sending message to HnApi actor")
                    .expect("HnApi actor died");
                rx.await
                    .context("Receiving response from HnApi actor")
                    .expect("HnApi actor died")
            }
            HnApi::Mock(data) => {
                let data = data.lock().await;
                data.stories.get(&id).cloned().ok_or_else(|| {
                    anyhow::anyhow!("Story {} not found in mock responses", id)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArcStr;
    use std::collections::HashMap;

    fn net_with(responses: &[(&str, &str)]) -> Net {
        let mut map = HashMap::new();
        for (url, body) in responses {
            map.insert(ArcStr::from(*url), ArcStr::from(*body));
        }
        Net::mock(map)
    }

    #[tokio::test]
    async fn test_hn_api_creation() {
        let net = Net::mock_empty();
        let api = HnApi::spawn(net);

        assert!(matches!(api, HnApi::Actual(_)));
    }

    #[tokio::test]
    async fn test_hn_api_with_custom_base_url() {
        let net = Net::mock_empty();
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        assert!(matches!(api, HnApi::Actual(_)));
    }

    #[tokio::test]
    async fn test_fetch_top_story_ids() {
        let net = net_with(&[("http://hn.test/v0/topstories.json", "[3, 1, 2]")]);
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        let ids = api.fetch_top_story_ids().await.unwrap();
        assert_eq!(ids.as_ref(), &[3, 1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_top_story_ids_rejects_malformed_body() {
        let net = net_with(&[("http://hn.test/v0/topstories.json", "not json")]);
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        assert!(api.fetch_top_story_ids().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_story() {
        let net = net_with(&[(
            "http://hn.test/v0/item/42.json",
            r#"{"id": 42, "title": "A story", "url": "http://example.com"}"#,
        )]);
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        let record = api.fetch_story(42).await.unwrap();
        assert_eq!(record.id, Some(42));
        assert_eq!(record.title.as_deref(), Some("A story"));
        assert_eq!(record.url.as_deref(), Some("http://example.com"));
    }

    #[tokio::test]
    async fn test_fetch_story_with_missing_fields() {
        let net = net_with(&[("http://hn.test/v0/item/7.json", r#"{"id": 7}"#)]);
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        let record = api.fetch_story(7).await.unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.title, None);
        assert_eq!(record.url, None);
    }

    #[tokio::test]
    async fn test_fetch_story_treats_null_item_as_error() {
        // The remote API answers `null` for IDs that do not exist
        let net = net_with(&[("http://hn.test/v0/item/9.json", "null")]);
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        assert!(api.fetch_story(9).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_story_network_failure() {
        let net = Net::mock_empty();
        let api = HnApi::spawn_with_base_url(net, ArcStr::from("http://hn.test"));

        assert!(api.fetch_story(1).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_api() {
        let mut stories = HashMap::new();
        stories.insert(
            5,
            StoryRecord {
                id: Some(5),
                title: Some("Mocked".into()),
                url: Some("http://example.com".into()),
            },
        );
        let api = HnApi::mock(MockData {
            top_story_ids: vec![5],
            stories,
        });

        let ids = api.fetch_top_story_ids().await.unwrap();
        assert_eq!(ids.as_ref(), &[5]);

        let record = api.fetch_story(5).await.unwrap();
        assert_eq!(record.title.as_deref(), Some("Mocked"));

        assert!(api.fetch_story(6).await.is_err());
    }
}

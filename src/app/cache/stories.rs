use anyhow::Context;
use std::sync::Arc;
use tokio::sync::Mutex;

mod core;
mod data;
pub mod message;
#[cfg(test)]
mod tests;

use crate::ArcSlice;
use crate::ArcStr;
use crate::api::hn::{HnApi, Story};
use crate::app::config::Config;
use crate::log::Log;
use message::Message;

/// The Story Cache Actor holds the aggregated top-story collection.
///
/// The cache keeps a single entry with an expiry time. A `get` on a missing or
/// expired entry fetches the story index, resolves every ID concurrently,
/// filters out incomplete stories and stores the result for the configured
/// time-to-live. Because population runs inside the actor loop, concurrent
/// callers queue behind one population and are all served the fresh entry,
/// so the remote API is hit once per expiry, not once per caller.
#[derive(Debug, Clone)]
pub enum StoryCache {
    Actual(tokio::sync::mpsc::Sender<Message>),
    Mock(Arc<Mutex<MockData>>),
}

/// Canned state backing a mock story cache.
#[derive(Debug, Default)]
pub struct MockData {
    /// The collection served to every `get`
    pub stories: Vec<Story>,
    /// When set, `get` fails with this message instead of serving stories
    pub error: Option<ArcStr>,
}

impl StoryCache {
    /// Spawns a new StoryCache actor.
    pub fn spawn(api: HnApi, config: Config, log: Log) -> Self {
        let (cache, _) = core::Core::new(api, config, log).spawn();
        cache
    }

    /// Creates a new mock StoryCache actor for testing.
    pub fn mock(data: MockData) -> Self {
        Self::Mock(Arc::new(Mutex::new(data)))
    }

    /// Returns the cached story collection, populating it first when the
    /// entry is missing or expired.
    ///
    /// Remote failures during population never surface here: a failed index
    /// fetch is served as an empty collection and failed item fetches are
    /// dropped from the result. Both are logged.
    pub async fn get(&self) -> anyhow::Result<ArcSlice<Story>> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { tx })
                    .await
                    .context("Sending message to StoryCache actor")
                    .expect("StoryCache actor died");
                rx.await
                    .context("Awaiting response from StoryCache actor")
                    .expect("StoryCache actor died")
            }
            Self::Mock(data) => {
                let data = data.lock().await;
                match &data.error {
                    Some(message) => Err(anyhow::anyhow!("{}", message)),
                    None => Ok(ArcSlice::from(&data.stories[..])),
                }
            }
        }
    }
}

use chrono::{Duration, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::data::StoryData;
use super::message::Message;
use crate::ArcSlice;
use crate::api::hn::{HnApi, Story};
use crate::app::config::{Config, USizeOpt};
use crate::log::Log;

const BUFFER_SIZE: usize = 100;
const SCOPE: &str = "app.cache.stories";

/// Core implementation for the Story Cache Actor.
pub struct Core {
    /// API actor for fetching the story index and story records
    api: HnApi,
    /// Config actor for the story limit and time-to-live
    config: Config,
    /// Log actor for logging
    log: Log,
    /// Internal state
    data: StoryData,
}

impl Core {
    /// Creates a new Core instance.
    pub fn new(api: HnApi, config: Config, log: Log) -> Self {
        Self {
            api,
            config,
            log,
            data: StoryData::default(),
        }
    }

    /// Spawns the actor and returns the public interface and join handle.
    pub fn spawn(self) -> (super::StoryCache, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            let mut core = self;

            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { tx } => {
                        let result = core.handle_get().await;
                        let _ = tx.send(result);
                    }
                }
            }
        });

        (super::StoryCache::Actual(tx), handle)
    }

    /// Serves the cached collection, populating it when missing or expired.
    ///
    /// Population happens inside the actor loop, so callers that arrive while
    /// one is running queue in the mailbox and are served the freshly stored
    /// entry instead of triggering another population. The limit and
    /// time-to-live are read from the configuration at population time, so
    /// changes take effect on the next expiry.
    async fn handle_get(&mut self) -> anyhow::Result<ArcSlice<Story>> {
        if let Some(stories) = self.data.fresh(Utc::now()) {
            return Ok(stories);
        }

        let limit = self.config.usize(USizeOpt::TopStoriesLimit).await;
        let ttl_minutes = self.config.usize(USizeOpt::CacheTtlMinutes).await;

        let stories = self.fetch_top_stories(limit).await;
        let stories = ArcSlice::from(&stories[..]);

        let expires_at = Utc::now() + Duration::minutes(ttl_minutes as i64);
        self.data.store(stories.clone(), expires_at);
        self.log.info(format!(
            "{SCOPE}: cached {} stories, entry expires at {}",
            stories.len(),
            expires_at
        ));

        Ok(stories)
    }

    /// Fetches the story index and resolves it into a filtered collection.
    ///
    /// The index is truncated to `limit` IDs and every ID is resolved on its
    /// own task; the results are collected in index order, so completion
    /// order never shows in the collection. An item that cannot be fetched
    /// becomes a placeholder, and the final filter drops every story without
    /// a title or URL. An index fetch failure produces an empty collection.
    /// Both failure kinds are logged and neither aborts the batch.
    async fn fetch_top_stories(&self, limit: usize) -> Vec<Story> {
        if limit == 0 {
            return Vec::new();
        }

        let ids = match self.api.fetch_top_story_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                self.log
                    .error(format!("{SCOPE}: failed to fetch the story index: {err:#}"));
                return Vec::new();
            }
        };

        let ids: Vec<u64> = ids.iter().copied().take(limit).collect();

        let mut handles = Vec::with_capacity(ids.len());
        for &id in &ids {
            let api = self.api.clone();
            handles.push(tokio::spawn(async move { api.fetch_story(id).await }));
        }

        let mut stories = Vec::with_capacity(handles.len());
        for (handle, id) in handles.into_iter().zip(ids) {
            let story = match handle.await {
                Ok(Ok(record)) => Story::from(record),
                Ok(Err(err)) => {
                    self.log
                        .warn(format!("{SCOPE}: story {id} failed: {err:#}"));
                    Story::placeholder(id)
                }
                Err(err) => {
                    self.log
                        .warn(format!("{SCOPE}: story {id} fetch task failed: {err}"));
                    Story::placeholder(id)
                }
            };
            stories.push(story);
        }

        stories.retain(Story::is_complete);
        stories
    }
}

use chrono::{DateTime, Utc};

use crate::ArcSlice;
use crate::api::hn::Story;

/// Internal state of the story cache actor: one entry plus its expiry time.
#[derive(Debug, Default)]
pub struct StoryData {
    /// The cached collection, `None` before the first population
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    /// The aggregated story collection
    stories: ArcSlice<Story>,
    /// The instant the entry stops being served
    expires_at: DateTime<Utc>,
}

impl StoryData {
    /// Returns the cached collection if it is still fresh at `now`.
    ///
    /// An entry expires the moment `now` reaches `expires_at`, so a zero
    /// time-to-live produces an entry that is already stale.
    pub fn fresh(&self, now: DateTime<Utc>) -> Option<ArcSlice<Story>> {
        self.entry
            .as_ref()
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.stories.clone())
    }

    /// Replaces the entry with a new collection expiring at `expires_at`.
    pub fn store(&mut self, stories: ArcSlice<Story>, expires_at: DateTime<Utc>) {
        self.entry = Some(CacheEntry {
            stories,
            expires_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArcStr;
    use chrono::Duration;

    fn stories() -> ArcSlice<Story> {
        ArcSlice::from(
            &[Story {
                id: 1,
                title: ArcStr::from("t"),
                url: ArcStr::from("u"),
            }][..],
        )
    }

    #[test]
    fn test_empty_data_is_never_fresh() {
        let data = StoryData::default();
        assert!(data.fresh(Utc::now()).is_none());
    }

    #[test]
    fn test_stored_entry_is_fresh_before_expiry() {
        let mut data = StoryData::default();
        let now = Utc::now();
        data.store(stories(), now + Duration::minutes(10));

        let fresh = data.fresh(now).unwrap();
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_stored_entry_expires() {
        let mut data = StoryData::default();
        let now = Utc::now();
        data.store(stories(), now);

        // The expiry instant itself is already stale
        assert!(data.fresh(now).is_none());
        assert!(data.fresh(now + Duration::minutes(1)).is_none());
    }

    #[test]
    fn test_store_replaces_previous_entry() {
        let mut data = StoryData::default();
        let now = Utc::now();
        data.store(stories(), now + Duration::minutes(10));
        data.store(ArcSlice::from(&[][..]), now + Duration::minutes(10));

        let fresh = data.fresh(now).unwrap();
        assert!(fresh.is_empty());
    }
}

use std::collections::HashMap;

use crate::{
    ArcStr,
    api::hn::HnApi,
    app::cache::stories::{MockData, StoryCache},
    app::config::{Config, Data, USizeOpt},
    log::Log,
    net::Net,
};

const BASE: &str = "http://hn.test";

fn index_url() -> ArcStr {
    ArcStr::from("http://hn.test/v0/topstories.json")
}

fn item_url(id: u64) -> ArcStr {
    ArcStr::from(format!("{}/v0/item/{}.json", BASE, id).as_str())
}

fn story_body(id: u64, title: &str, url: &str) -> ArcStr {
    ArcStr::from(format!(r#"{{"id": {}, "title": "{}", "url": "{}"}}"#, id, title, url).as_str())
}

async fn config_with(limit: usize, ttl_minutes: usize) -> Config {
    let config = Config::mock(Data::default());
    config.set_usize(USizeOpt::TopStoriesLimit, limit).await;
    config
        .set_usize(USizeOpt::CacheTtlMinutes, ttl_minutes)
        .await;
    config
}

fn cache_over(net: Net, config: Config) -> StoryCache {
    let api = HnApi::spawn_with_base_url(net, ArcStr::from(BASE));
    StoryCache::spawn(api, config, Log::Mock)
}

#[tokio::test]
async fn test_get_returns_complete_stories_in_index_order() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[3, 1, 2]"));
    responses.insert(item_url(3), story_body(3, "Third", "http://three"));
    responses.insert(item_url(1), story_body(1, "First", "http://one"));
    responses.insert(item_url(2), story_body(2, "Second", "http://two"));
    let net = Net::mock(responses);

    let cache = cache_over(net, config_with(10, 10).await);
    let stories = cache.get().await.unwrap();

    // Collection order follows the index, not fetch completion
    let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(stories.iter().all(|s| s.is_complete()));
}

#[tokio::test]
async fn test_failed_item_fetch_does_not_affect_siblings() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 2, 3]"));
    responses.insert(item_url(1), story_body(1, "One", "http://one"));
    // Item 2 has no canned response, so its fetch fails
    responses.insert(item_url(3), story_body(3, "Three", "http://three"));
    let net = Net::mock(responses);

    let cache = cache_over(net, config_with(10, 10).await);
    let stories = cache.get().await.unwrap();

    let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_stories_without_title_or_url_are_dropped() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 2, 3, 4]"));
    responses.insert(item_url(1), story_body(1, "Complete", "http://one"));
    responses.insert(item_url(2), ArcStr::from(r#"{"id": 2, "url": "http://two"}"#));
    responses.insert(item_url(3), ArcStr::from(r#"{"id": 3, "title": "No URL"}"#));
    responses.insert(item_url(4), ArcStr::from("null"));
    let net = Net::mock(responses);

    let cache = cache_over(net, config_with(10, 10).await);
    let stories = cache.get().await.unwrap();

    let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_limit_truncates_the_index() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 2, 3, 4, 5]"));
    responses.insert(item_url(1), story_body(1, "One", "http://one"));
    responses.insert(item_url(2), story_body(2, "Two", "http://two"));
    let net = Net::mock(responses);

    let cache = cache_over(net.clone(), config_with(2, 10).await);
    let stories = cache.get().await.unwrap();

    let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);

    // Only the index and the two truncated items were requested
    let requests = net.requests().await;
    assert_eq!(requests.len(), 3);
    assert!(requests.contains(&index_url()));
    assert!(requests.contains(&item_url(1)));
    assert!(requests.contains(&item_url(2)));
    assert!(!requests.contains(&item_url(3)));
}

#[tokio::test]
async fn test_zero_limit_issues_no_requests() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 2, 3]"));
    let net = Net::mock(responses);

    let cache = cache_over(net.clone(), config_with(0, 10).await);
    let stories = cache.get().await.unwrap();

    assert!(stories.is_empty());
    assert!(net.requests().await.is_empty());
}

#[tokio::test]
async fn test_second_get_within_ttl_hits_the_cache() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 2]"));
    responses.insert(item_url(1), story_body(1, "One", "http://one"));
    responses.insert(item_url(2), story_body(2, "Two", "http://two"));
    let net = Net::mock(responses);

    let cache = cache_over(net.clone(), config_with(10, 10).await);
    let first = cache.get().await.unwrap();
    let requests_after_first = net.requests().await.len();
    let second = cache.get().await.unwrap();

    assert_eq!(first, second);
    // One index call plus one call per item, across both reads
    assert_eq!(requests_after_first, 3);
    assert_eq!(net.requests().await.len(), requests_after_first);
}

#[tokio::test]
async fn test_zero_ttl_repopulates_on_every_get() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1]"));
    responses.insert(item_url(1), story_body(1, "One", "http://one"));
    let net = Net::mock(responses);

    let cache = cache_over(net.clone(), config_with(10, 0).await);
    cache.get().await.unwrap();
    cache.get().await.unwrap();

    // Both reads populated: two index calls and two item calls
    assert_eq!(net.requests().await.len(), 4);
}

#[tokio::test]
async fn test_index_failure_yields_empty_collection_and_is_cached() {
    // No canned responses at all, so the index fetch fails
    let net = Net::mock_empty();

    let cache = cache_over(net.clone(), config_with(5, 10).await);
    let stories = cache.get().await.unwrap();
    assert!(stories.is_empty());

    // The empty result is cached, so a second read adds no calls
    let second = cache.get().await.unwrap();
    assert!(second.is_empty());
    assert_eq!(net.requests().await.len(), 1);
}

#[tokio::test]
async fn test_duplicate_ids_pass_through() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 1, 2]"));
    responses.insert(item_url(1), story_body(1, "One", "http://one"));
    responses.insert(item_url(2), story_body(2, "Two", "http://two"));
    let net = Net::mock(responses);

    let cache = cache_over(net, config_with(10, 10).await);
    let stories = cache.get().await.unwrap();

    let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 1, 2]);
}

#[tokio::test]
async fn test_concurrent_gets_trigger_one_population() {
    let mut responses = HashMap::new();
    responses.insert(index_url(), ArcStr::from("[1, 2]"));
    responses.insert(item_url(1), story_body(1, "One", "http://one"));
    responses.insert(item_url(2), story_body(2, "Two", "http://two"));
    let net = Net::mock(responses);

    let cache = cache_over(net.clone(), config_with(10, 10).await);
    let (first, second) = tokio::join!(cache.get(), cache.get());

    assert_eq!(first.unwrap(), second.unwrap());
    // The mailbox serialized the two reads into a single population
    assert_eq!(net.requests().await.len(), 3);
}

#[tokio::test]
async fn test_mock_cache_serves_canned_stories() {
    use crate::api::hn::Story;

    let cache = StoryCache::mock(MockData {
        stories: vec![Story {
            id: 9,
            title: ArcStr::from("Canned"),
            url: ArcStr::from("http://canned"),
        }],
        error: None,
    });

    let stories = cache.get().await.unwrap();
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].id, 9);
}

#[tokio::test]
async fn test_mock_cache_can_fail() {
    let cache = StoryCache::mock(MockData {
        stories: Vec::new(),
        error: Some(ArcStr::from("cache exploded")),
    });

    let err = cache.get().await.unwrap_err();
    assert!(err.to_string().contains("cache exploded"));
}

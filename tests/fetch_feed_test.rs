mod common;

use common::{Reply, StubTransport};
use pretty_assertions::assert_eq;
use serde_json::json;
use sharefeed::mock::mock_feed;
use sharefeed::transport::HttpMethod;
use sharefeed::{ClientConfig, FeedFetcher, FeedSort, TransportError};
use std::sync::Arc;
use std::time::Duration;

fn config() -> ClientConfig {
    ClientConfig::default()
        .with_base_url("http://bff.test/")
        .with_feed_timeout(Duration::from_millis(100))
}

fn live_payload() -> serde_json::Value {
    json!({
        "items": [
            {
                "id": "a1",
                "title": "First",
                "summary": "one",
                "topic": "tech",
                "tags": ["rust", "http"],
                "author": "Ana",
                "authorMeta": { "avatar": "https://img/ana.png", "isFollowing": true, "isBookmarked": false },
                "publishedAt": "2024-05-01T08:00:00.000Z",
                "engagement": { "views": 120, "bookmarks": 7, "rating": 4.2 },
                "details": {
                    "body": "Full text",
                    "media": [{ "id": "m1", "type": "audio", "src": "https://cdn/a.mp3" }]
                },
                "comments": []
            },
            {
                "id": "a2",
                "title": "Second",
                "summary": "two",
                "topic": "tech",
                "tags": [],
                "author": "Bo",
                "authorMeta": { "isFollowing": false, "isBookmarked": true },
                "publishedAt": "2024-05-01T07:00:00.000Z",
                "engagement": { "views": 0, "bookmarks": 0, "rating": 3.5 },
                "details": { "body": "", "media": [] },
                "comments": []
            }
        ],
        "cacheTtlSeconds": 45.5
    })
}

#[tokio::test]
async fn test_live_feed_round_trips() {
    let payload = live_payload();
    let transport = Arc::new(StubTransport::json(200, &payload));
    let fetcher = FeedFetcher::new(transport.clone(), &config());

    let feed = fetcher.fetch_feed(FeedSort::Trending).await;

    assert_eq!(feed.items.len(), 2);
    assert_eq!(feed.cache_ttl_seconds, 45.5);
    assert_eq!(serde_json::to_value(&feed).unwrap(), payload);
}

#[tokio::test]
async fn test_request_shape() {
    let transport = Arc::new(StubTransport::json(200, &json!({ "items": [] })));
    let fetcher = FeedFetcher::new(transport.clone(), &config());

    fetcher.fetch_feed(FeedSort::Recommended).await;

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "http://bff.test/api/v1/feeds?sort=recommended");
    assert_eq!(request.header_value("Accept"), Some("application/json"));
    assert_eq!(request.header_value("Cache-Control"), Some("no-store"));
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_server_error_serves_mock_for_sort() {
    for sort in FeedSort::ALL {
        let transport = Arc::new(StubTransport::json(500, &json!({ "error": "down" })));
        let fetcher = FeedFetcher::new(transport, &config());

        let feed = fetcher.fetch_feed(sort).await;

        assert_eq!(feed, mock_feed(sort));
        assert_eq!(feed.cache_ttl_seconds, 0.0);
    }
}

#[tokio::test]
async fn test_transport_error_serves_mock() {
    let transport = Arc::new(StubTransport::new(Reply::Fail(TransportError::Connect(
        "connection refused".to_string(),
    ))));
    let fetcher = FeedFetcher::new(transport, &config());

    let feed = fetcher.fetch_feed(FeedSort::Latest).await;
    assert_eq!(feed, mock_feed(FeedSort::Latest));
    assert_eq!(feed.cache_ttl_seconds, 0.0);
}

#[tokio::test]
async fn test_timeout_serves_mock() {
    let transport = Arc::new(StubTransport::new(Reply::Hang));
    let fetcher = FeedFetcher::new(transport.clone(), &config());

    let feed = tokio::time::timeout(Duration::from_secs(5), fetcher.fetch_feed(FeedSort::Trending))
        .await
        .expect("fetch_feed must give up after its own timeout");

    assert_eq!(feed, mock_feed(FeedSort::Trending));
    assert_eq!(transport.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_payload_serves_mock() {
    let mut payload = live_payload();
    payload["items"][1]["engagement"]["views"] = json!("many");
    let transport = Arc::new(StubTransport::json(200, &payload));
    let fetcher = FeedFetcher::new(transport, &config());

    let feed = fetcher.fetch_feed(FeedSort::Latest).await;
    assert_eq!(feed, mock_feed(FeedSort::Latest));
}

#[tokio::test]
async fn test_non_json_body_serves_mock() {
    let transport = Arc::new(StubTransport::new(Reply::Status(200, b"<html>oops</html>".to_vec())));
    let fetcher = FeedFetcher::new(transport, &config());

    let feed = fetcher.fetch_feed(FeedSort::Recommended).await;
    assert_eq!(feed, mock_feed(FeedSort::Recommended));
}

#[tokio::test]
async fn test_no_retry_inside_fetcher() {
    let transport = Arc::new(StubTransport::json(503, &json!({})));
    let fetcher = FeedFetcher::new(transport.clone(), &config());

    fetcher.fetch_feed(FeedSort::Latest).await;
    assert_eq!(transport.requests.lock().unwrap().len(), 1);
}

//! Application-wide feed context. Construct one at startup and hand an
//! `Arc<FeedContext>` to every consumer; it owns the fetcher, the reporter
//! and the per-sort freshness cache.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::time::Instant;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ReportingError;
use crate::events::EventReporter;
use crate::fetcher::FeedFetcher;
use crate::models::{ContentEvent, EventKind, FeedItem, FeedResponse, FeedSort};
use crate::transport::{ReqwestTransport, Transport};

/// Caching knobs supplied by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Upper bound on how long a fetched feed is served from cache.
    pub stale_time: Duration,
    pub refetch_on_focus: bool,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(60),
            refetch_on_focus: false,
        }
    }
}

struct CachedFeed {
    feed: FeedResponse,
    fresh_until: Instant,
}

pub struct FeedContext {
    fetcher: FeedFetcher,
    reporter: EventReporter,
    policy: QueryPolicy,
    cache: Mutex<HashMap<FeedSort, CachedFeed>>,
}

impl FeedContext {
    pub fn new(fetcher: FeedFetcher, reporter: EventReporter, policy: QueryPolicy) -> Self {
        Self {
            fetcher,
            reporter,
            policy,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Shares one transport between the fetcher and the reporter.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig, policy: QueryPolicy) -> Self {
        Self::new(
            FeedFetcher::new(transport.clone(), config),
            EventReporter::new(transport, config),
            policy,
        )
    }

    pub fn from_config(config: &ClientConfig, policy: QueryPolicy) -> Result<Self, reqwest::Error> {
        let transport = Arc::new(ReqwestTransport::new(&config.user_agent)?);
        Ok(Self::with_transport(transport, config, policy))
    }

    pub fn policy(&self) -> &QueryPolicy {
        &self.policy
    }

    /// Serves `sort` from cache while fresh, otherwise fetches it.
    pub async fn feed(&self, sort: FeedSort) -> FeedResponse {
        if let Some(feed) = self.cached(sort) {
            debug!(%sort, "Serving cached feed");
            return feed;
        }
        self.refetch(sort).await
    }

    /// Just the items, as view code consumes them.
    pub async fn items(&self, sort: FeedSort) -> Vec<FeedItem> {
        self.feed(sort).await.items
    }

    /// Fetches `sort` regardless of cache state and stores the result.
    pub async fn refetch(&self, sort: FeedSort) -> FeedResponse {
        let feed = self.fetcher.fetch_feed(sort).await;
        self.store(sort, &feed);
        feed
    }

    pub async fn on_focus(&self, sort: FeedSort) -> FeedResponse {
        if self.policy.refetch_on_focus {
            self.refetch(sort).await
        } else {
            self.feed(sort).await
        }
    }

    pub fn invalidate(&self, sort: FeedSort) {
        self.lock_cache().remove(&sort);
    }

    pub async fn track_view(
        &self,
        content_id: &str,
        sort: FeedSort,
        metadata: Option<Map<String, Value>>,
    ) -> Result<(), ReportingError> {
        self.track(EventKind::Viewed, content_id, sort, metadata).await
    }

    pub async fn track_bookmark(
        &self,
        content_id: &str,
        sort: FeedSort,
        metadata: Option<Map<String, Value>>,
    ) -> Result<(), ReportingError> {
        self.track(EventKind::Bookmarked, content_id, sort, metadata).await
    }

    async fn track(
        &self,
        event: EventKind,
        content_id: &str,
        sort: FeedSort,
        metadata: Option<Map<String, Value>>,
    ) -> Result<(), ReportingError> {
        let event = ContentEvent {
            event,
            content_id: content_id.to_string(),
            sort,
            metadata,
        };
        self.reporter.report_event(&event).await
    }

    fn cached(&self, sort: FeedSort) -> Option<FeedResponse> {
        let cache = self.lock_cache();
        cache
            .get(&sort)
            .filter(|entry| Instant::now() < entry.fresh_until)
            .map(|entry| entry.feed.clone())
    }

    fn store(&self, sort: FeedSort, feed: &FeedResponse) {
        let ttl = ttl_duration(feed.cache_ttl_seconds).min(self.policy.stale_time);
        let mut cache = self.lock_cache();
        if ttl.is_zero() {
            cache.remove(&sort);
            return;
        }
        cache.insert(
            sort,
            CachedFeed {
                feed: feed.clone(),
                fresh_until: Instant::now() + ttl,
            },
        );
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<FeedSort, CachedFeed>> {
        // The map holds plain values, so a poisoned lock is still consistent.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Non-positive or NaN hints mean "do not cache"; oversized ones saturate.
fn ttl_duration(seconds: f64) -> Duration {
    if seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

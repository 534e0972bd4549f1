use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{FetchError, TransportError};
use crate::mock::mock_feed;
use crate::models::{FeedResponse, FeedSort};
use crate::transport::{HttpRequest, Transport};
use crate::validator::validate_feed_slice;

/// Fetches feeds from the BFF and degrades to the mock dataset on any
/// failure. Callers always get a usable `FeedResponse`.
#[derive(Clone)]
pub struct FeedFetcher {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl FeedFetcher {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            config: config.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.config.feed_timeout
    }

    /// Returns the live feed for `sort`, or the mock feed for `sort` with a
    /// zero TTL when the BFF fails, times out, or sends an invalid payload.
    /// No retries happen here.
    pub async fn fetch_feed(&self, sort: FeedSort) -> FeedResponse {
        match self.fetch_live(sort).await {
            Ok(feed) => {
                info!(%sort, items = feed.items.len(), ttl = feed.cache_ttl_seconds, "Fetched live feed");
                feed
            }
            Err(e) => {
                warn!(%sort, error = %e, "Feed request failed, serving mock data");
                mock_feed(sort)
            }
        }
    }

    pub(crate) async fn fetch_live(&self, sort: FeedSort) -> Result<FeedResponse, FetchError> {
        let request = HttpRequest::get(self.config.feed_url(sort))
            .header("Accept", "application/json")
            .header("Cache-Control", "no-store");

        // Cancelled on every way out of this function.
        let cancel = CancellationToken::new();
        let _release = cancel.clone().drop_guard();

        debug!(url = %request.url, timeout_ms = self.timeout().as_millis() as u64, "Requesting feed");
        let response = tokio::select! {
            result = self.transport.send(request, &cancel) => result?,
            _ = tokio::time::sleep(self.timeout()) => {
                cancel.cancel();
                return Err(TransportError::Timeout.into());
            }
        };

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        Ok(validate_feed_slice(&response.body)?)
    }
}

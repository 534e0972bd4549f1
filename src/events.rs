use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ReportingError;
use crate::models::ContentEvent;
use crate::transport::{HttpRequest, Transport};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StampedEvent<'a> {
    #[serde(flatten)]
    event: &'a ContentEvent,
    occurred_at: String,
}

/// Best-effort delivery of engagement events. A failed event is lost; the
/// caller decides whether to surface the error.
#[derive(Clone)]
pub struct EventReporter {
    transport: Arc<dyn Transport>,
    url: String,
}

impl EventReporter {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            url: config.events_url(),
        }
    }

    pub async fn report_event(&self, event: &ContentEvent) -> Result<(), ReportingError> {
        let body = serde_json::to_vec(&StampedEvent {
            event,
            occurred_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })?;
        let request = HttpRequest::post(&self.url, body).header("Content-Type", "application/json");

        debug!(event = ?event.event, content_id = %event.content_id, "Reporting event");
        // Never cancelled: the reporter has no timeout of its own.
        let response = self.transport.send(request, &CancellationToken::new()).await?;

        if !response.is_success() {
            return Err(ReportingError::Status(response.status));
        }

        info!(event = ?event.event, content_id = %event.content_id, status = response.status, "Event reported");
        Ok(())
    }
}

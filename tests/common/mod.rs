#![allow(dead_code)]

use async_trait::async_trait;
use sharefeed::transport::{HttpRequest, HttpResponse, Transport};
use sharefeed::TransportError;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub enum Reply {
    Status(u16, Vec<u8>),
    Fail(TransportError),
    Hang,
}

/// Replays one canned reply for every request and records what was sent.
pub struct StubTransport {
    reply: Reply,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(Reply::Status(status, serde_json::to_vec(body).unwrap()))
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Status(status, body) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Fail(e) => Err(e.clone()),
            Reply::Hang => {
                cancel.cancelled().await;
                Err(TransportError::Cancelled)
            }
        }
    }
}

//! Scripted transport for unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;

use super::{ApiResponse, Transport};
use crate::error::Result;
use crate::request::PendingRequest;

type Responder = Box<dyn Fn(&PendingRequest) -> Result<ApiResponse> + Send + Sync>;

/// Transport that answers every request through a closure and records what it saw
pub(crate) struct ScriptedTransport {
    responder: Responder,
    sent: Mutex<Vec<PendingRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        responder: impl Fn(&PendingRequest) -> ApiResponse + Send + Sync + 'static,
    ) -> Self {
        Self::fallible(move |request| Ok(responder(request)))
    }

    /// Transport whose responder may also fail before producing a response
    pub(crate) fn fallible(
        responder: impl Fn(&PendingRequest) -> Result<ApiResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Every request sent so far, in order
    pub(crate) fn sent(&self) -> Vec<PendingRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Requests sent to `path`
    pub(crate) fn sent_to(&self, path: &str) -> Vec<PendingRequest> {
        self.sent()
            .into_iter()
            .filter(|r| r.path() == path)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &PendingRequest) -> Result<ApiResponse> {
        self.sent.lock().unwrap().push(request.clone());
        // Let concurrent callers interleave like real network calls would.
        tokio::task::yield_now().await;
        (self.responder)(request)
    }
}

pub(crate) fn status(status: StatusCode, body: serde_json::Value) -> ApiResponse {
    ApiResponse::json_body(status, &body)
}

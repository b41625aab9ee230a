//! In-memory transport for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Replays canned outcomes in order and records every request it is given.
///
/// Once the script is exhausted every further send fails with a
/// `TransportError`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that answers every scripted send with the given responses.
    pub fn with_responses(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.lock_script().push_back(Ok(response));
    }

    pub fn push_failure(&self, error: TransportError) {
        self.lock_script().push_back(Err(error));
    }

    /// Requests sent so far, oldest first.
    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_sent(&self) -> Option<HttpRequest> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<HttpResponse, TransportError>>> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        self.lock_script()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}

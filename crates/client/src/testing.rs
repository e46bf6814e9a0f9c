//! Scripted transport for tests.
//!
//! Records every dispatched request and answers with the next scripted
//! response. Running out of responses yields a network error rather than a
//! panic, so tests can assert on how far a sequence got.

use async_trait::async_trait;
use pinecone_assistant_core::{DispatchedRequest, Transport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::dispatcher::{ApiClient, ClientSettings};

pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<DispatchedRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport whose calls all succeed with `values`, in order.
    pub fn ok(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Ok).collect())
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<DispatchedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(method, url)` of every request, for compact assertions.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.method.to_string(), r.url.clone()))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: DispatchedRequest) -> Result<Value, TransportError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::Network(format!(
                "ScriptedTransport: no more responses (call #{call})"
            )))
        })
    }
}

/// An [`ApiClient`] with default settings over `transport`.
pub fn client(transport: Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::new(transport, ClientSettings::default())
}

//! Transport trait: the host's authenticated HTTP capability.
//!
//! The node builds requests; something else sends them. In a host runtime
//! this is the host's authenticated request helper, standalone it is the
//! `reqwest` transport from the client crate, and in tests a scripted stub.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::DispatchedRequest;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request, authenticating with `request.credential`.
    ///
    /// Returns the decoded JSON response (`Value::Null` for empty bodies).
    /// Non-2xx responses are errors.
    async fn send(&self, request: DispatchedRequest) -> Result<Value, TransportError>;
}

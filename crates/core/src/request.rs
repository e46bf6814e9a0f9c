//! Outbound request types.
//!
//! Callers choose the body encoding explicitly through [`RequestBody`]; the
//! dispatcher never inspects payloads to guess whether a request is
//! multipart.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The file part of a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

// Payload bytes are elided from debug logs.
impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart { .. })
    }

    /// The JSON payload, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// What an action asks the dispatcher to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Host the request goes to (assistant host or control plane).
    pub base_url: String,
    /// Path relative to the `/assistant/` API root.
    pub endpoint: String,
    pub body: RequestBody,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.into(),
            endpoint: endpoint.into(),
            body: RequestBody::Empty,
            query: Vec::new(),
        }
    }

    pub fn get(base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, base_url, endpoint)
    }

    pub fn post(base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, base_url, endpoint)
    }

    pub fn delete(base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, base_url, endpoint)
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A fully built request, handed to the [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Always `None` for GET requests.
    pub body: Option<RequestBody>,
    pub query: Vec<(String, String)>,
    /// Whether the transport should send and parse JSON. Cleared for
    /// multipart bodies so the transport sets its own boundary.
    pub json: bool,
    /// Name of the credential the transport authenticates with.
    pub credential: String,
}

impl DispatchedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The JSON body, if one was sent.
    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref().and_then(RequestBody::as_json)
    }
}

//! `reqwest` transport.
//!
//! Sends a [`DispatchedRequest`] as-is: the dispatcher has already decided
//! headers, query, and body encoding. Credentials are looked up by the name
//! carried on the request.

use async_trait::async_trait;
use pinecone_assistant_config::AppConfig;
use pinecone_assistant_core::{
    DispatchedRequest, FilePart, HttpMethod, RequestBody, Transport, TransportError,
};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

use crate::ClientError;
use crate::credential::ApiKeyCredential;

pub struct HttpTransport {
    client: reqwest::Client,
    credentials: HashMap<String, ApiKeyCredential>,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials: HashMap::new(),
        })
    }

    /// Register a credential. Replaces any existing one with the same name.
    pub fn with_credential(mut self, credential: ApiKeyCredential) -> Self {
        self.credentials.insert(credential.name.clone(), credential);
        self
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let api_key = config.require_api_key()?;
        let transport = Self::new(Duration::from_secs(config.api.timeout_secs))?
            .with_credential(ApiKeyCredential::new(&config.api.credential_name, api_key));
        Ok(transport)
    }
}

fn file_part(file: FilePart) -> Result<Part, TransportError> {
    let FilePart {
        file_name,
        mime_type,
        data,
        ..
    } = file;
    let part = Part::bytes(data).file_name(file_name);
    // An unparsable MIME type is dropped rather than failing the upload.
    if Part::bytes(Vec::<u8>::new()).mime_str(&mime_type).is_err() {
        return Ok(part);
    }
    part.mime_str(&mime_type)
        .map_err(|e| TransportError::Network(format!("Invalid multipart body: {e}")))
}

fn multipart_form(fields: Vec<(String, String)>, file: FilePart) -> Result<Form, TransportError> {
    let field_name = file.field_name.clone();
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    Ok(form.part(field_name, file_part(file)?))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: DispatchedRequest) -> Result<Value, TransportError> {
        let credential = self
            .credentials
            .get(&request.credential)
            .ok_or_else(|| TransportError::Credential(request.credential.clone()))?;

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = credential.apply(builder);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if request.json {
            builder = builder.header(reqwest::header::ACCEPT, "application/json");
        }

        builder = match request.body {
            None | Some(RequestBody::Empty) => builder,
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Multipart { fields, file }) => {
                builder.multipart(multipart_form(fields, file)?)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "Pinecone API error");
            return Err(TransportError::Status {
                status_code: status.as_u16(),
                message: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(_) if !request.json => Ok(Value::String(text)),
            Err(e) => Err(TransportError::Decode(e.to_string())),
        }
    }
}

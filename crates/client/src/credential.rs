//! API-key credential.
//!
//! Pinecone authenticates with a single secret sent as the `Api-Key` header.
//! The connectivity test lists assistants on the control plane, which any
//! valid key may do.

use pinecone_assistant_core::{ApiRequest, TransportError};
use tracing::info;

use crate::dispatcher::ApiClient;

pub const API_KEY_HEADER: &str = "Api-Key";

#[derive(Clone)]
pub struct ApiKeyCredential {
    pub name: String,
    api_key: String,
}

impl ApiKeyCredential {
    pub fn new(name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
        }
    }

    /// Attach the key to an outgoing request.
    pub fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header(API_KEY_HEADER, &self.api_key)
    }
}

impl std::fmt::Debug for ApiKeyCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCredential")
            .field("name", &self.name)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Verify the configured credential by listing assistants.
pub async fn test_connection(client: &ApiClient) -> Result<(), TransportError> {
    client
        .send(ApiRequest::get(client.control_plane_url(), "assistants"), None)
        .await?;
    info!("Pinecone credential verified");
    Ok(())
}

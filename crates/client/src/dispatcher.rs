//! Request dispatcher.
//!
//! Joins the API root onto the target host, attaches the version and
//! client-identification headers, decides the JSON flag from the body
//! variant, and forwards to the transport. Transport errors are returned
//! as-is.

use pinecone_assistant_config::AppConfig;
use pinecone_assistant_core::{ApiRequest, DispatchedRequest, HttpMethod, Transport, TransportError};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::source_tag::SourceTagger;
use crate::{ClientError, HttpTransport};

/// Path segment every endpoint lives under.
const API_ROOT: &str = "assistant";

pub const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";

/// The process-wide settings a dispatcher needs, taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_version: String,
    pub package_name: String,
    pub package_version: String,
    pub source_tags: SourceTagger,
    pub credential_name: String,
    pub control_plane_url: String,
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_version: config.api.version.clone(),
            package_name: config.package.name.clone(),
            package_version: config.package.version.clone(),
            source_tags: SourceTagger::from(&config.source_tag),
            credential_name: config.api.credential_name.clone(),
            control_plane_url: config.api.control_plane_url.clone(),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Builds and sends Pinecone Assistant API requests.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    settings: ClientSettings,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, settings: ClientSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Build a client backed by [`HttpTransport`], authenticated with the
    /// configured API key.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let settings = ClientSettings::from(config);
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), settings))
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Host for account-level calls such as listing assistants.
    pub fn control_plane_url(&self) -> &str {
        &self.settings.control_plane_url
    }

    /// `{package} v{version}; source_tag={normalized}`
    pub fn user_agent(&self, source_tag: Option<&str>) -> String {
        format!(
            "{} v{}; source_tag={}",
            self.settings.package_name,
            self.settings.package_version,
            self.settings.source_tags.normalize(source_tag)
        )
    }

    /// Turn an action's request into what goes over the wire.
    pub fn build(&self, request: ApiRequest, source_tag: Option<&str>) -> DispatchedRequest {
        let url = format!(
            "{}/{API_ROOT}/{}",
            request.base_url.trim_end_matches('/'),
            request.endpoint.trim_start_matches('/')
        );

        let json = !request.body.is_multipart();
        let body = match request.method {
            HttpMethod::Get => None,
            _ => Some(request.body),
        };

        DispatchedRequest {
            method: request.method,
            url,
            headers: vec![
                (API_VERSION_HEADER.into(), self.settings.api_version.clone()),
                ("User-Agent".into(), self.user_agent(source_tag)),
            ],
            body,
            query: request.query,
            json,
            credential: self.settings.credential_name.clone(),
        }
    }

    /// Build and send one request.
    pub async fn send(
        &self,
        request: ApiRequest,
        source_tag: Option<&str>,
    ) -> Result<Value, TransportError> {
        let dispatched = self.build(request, source_tag);
        debug!(
            method = %dispatched.method,
            url = %dispatched.url,
            query = ?dispatched.query,
            json = dispatched.json,
            "Making API request to Pinecone"
        );
        self.transport.send(dispatched).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use pinecone_assistant_core::{FilePart, RequestBody};
    use serde_json::json;

    const HOST: &str = "https://prod-1-data.ke.pinecone.io";

    fn client() -> ApiClient {
        ApiClient::new(Arc::new(ScriptedTransport::ok(vec![])), ClientSettings::default())
    }

    fn file_part() -> FilePart {
        FilePart {
            field_name: "file".into(),
            file_name: "test.pdf".into(),
            mime_type: "application/pdf".into(),
            data: b"%PDF".to_vec(),
        }
    }

    #[test]
    fn url_joins_api_root() {
        let built = client().build(ApiRequest::get(format!("{HOST}/"), "files/test-assistant"), None);
        assert_eq!(built.url, format!("{HOST}/assistant/files/test-assistant"));
    }

    #[test]
    fn get_never_carries_a_body() {
        let request = ApiRequest::get(HOST, "files/a")
            .with_body(RequestBody::Json(json!({"name": "test.pdf"})));
        let built = client().build(request, None);
        assert!(built.body.is_none());
        assert!(built.json);

        let request = ApiRequest::get(HOST, "files/a").with_body(RequestBody::Multipart {
            fields: vec![],
            file: file_part(),
        });
        assert!(client().build(request, None).body.is_none());
    }

    #[test]
    fn json_bodies_are_flagged_json() {
        let request = ApiRequest::post(HOST, "chat/a/context")
            .with_body(RequestBody::Json(json!({"query": "q"})));
        let built = client().build(request, None);
        assert!(built.json);
        assert_eq!(built.json_body(), Some(&json!({"query": "q"})));
    }

    #[test]
    fn multipart_bodies_clear_json_flag() {
        let request = ApiRequest::post(HOST, "files/a").with_body(RequestBody::Multipart {
            fields: vec![],
            file: file_part(),
        });
        let built = client().build(request, None);
        assert!(!built.json);
        assert!(matches!(built.body, Some(RequestBody::Multipart { .. })));
    }

    #[test]
    fn headers_carry_version_and_client_identity() {
        let built = client().build(ApiRequest::delete(HOST, "files/a/b"), Some("My Pipeline"));
        assert_eq!(built.header("x-pinecone-api-version"), Some("2025-10"));
        let agent = built.header("User-Agent").unwrap();
        assert!(agent.starts_with("pinecone-assistant-node v"));
        assert!(agent.ends_with("; source_tag=n8n:my_pipeline"));
        assert_eq!(built.credential, "pineconeAssistantApi");
    }

    #[test]
    fn query_passes_through() {
        let request = ApiRequest::get(HOST, "files/a").with_query("filter", r#"{"k":"v"}"#);
        let built = client().build(request, None);
        assert_eq!(built.query_value("filter"), Some(r#"{"k":"v"}"#));
    }

    #[tokio::test]
    async fn transport_errors_propagate_unmodified() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(TransportError::Status {
            status_code: 500,
            message: "boom".into(),
        })]));
        let client = ApiClient::new(transport.clone(), ClientSettings::default());
        let err = client
            .send(ApiRequest::get(HOST, "files/a"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status_code: 500, .. }));
        assert_eq!(transport.call_count(), 1);
    }
}

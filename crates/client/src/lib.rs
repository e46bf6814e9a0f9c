//! Request layer for the Pinecone Assistant API.
//!
//! [`ApiClient`] turns an [`ApiRequest`](pinecone_assistant_core::ApiRequest)
//! into a fully headed [`DispatchedRequest`](pinecone_assistant_core::DispatchedRequest)
//! and hands it to a [`Transport`](pinecone_assistant_core::Transport).
//! [`HttpTransport`] is the `reqwest` implementation used outside a host.

pub mod credential;
pub mod dispatcher;
pub mod http;
pub mod source_tag;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use credential::{ApiKeyCredential, test_connection};
pub use dispatcher::{ApiClient, ClientSettings};
pub use http::HttpTransport;
pub use source_tag::SourceTagger;

use pinecone_assistant_config::ConfigError;
use pinecone_assistant_core::TransportError;

/// Errors building a client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

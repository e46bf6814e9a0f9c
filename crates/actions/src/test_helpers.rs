//! Shared fixtures for action tests.

pub use pinecone_assistant_client::testing::{ScriptedTransport, client};

use pinecone_assistant_core::{AssistantRef, BinaryData, NodeItem};
use serde_json::{Value, json};

pub const HOST: &str = "https://prod-1-data.ke.pinecone.io";

pub fn assistant() -> AssistantRef {
    AssistantRef::new("test-assistant", HOST)
}

/// The assistant token as the host form sends it.
pub fn token() -> String {
    assistant().to_token()
}

pub fn pdf_item() -> NodeItem {
    NodeItem::new(json!({})).with_binary(
        "data",
        BinaryData::new(b"%PDF-1.4 test".to_vec(), "test.pdf", "application/pdf"),
    )
}

/// Parse the `metadata` query parameter of an upload request.
pub fn metadata_query(request: &pinecone_assistant_core::DispatchedRequest) -> Value {
    let raw = request.query_value("metadata").expect("metadata query parameter");
    serde_json::from_str(raw).expect("metadata is JSON")
}

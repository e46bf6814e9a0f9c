//! Error types for the Pinecone Assistant domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use thiserror::Error;

/// Failure reported by the HTTP transport.
///
/// These are propagated unmodified through every action: no retry and no
/// status-specific handling happens above the transport.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("API request failed: {message} (status: {status_code})")]
    Status { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Credential not configured: {0}")]
    Credential(String),
}

/// Failure of a single action handler.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Missing or malformed input, raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The lookup succeeded but matched nothing.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unhandled resource/operation: \"{resource}\" / \"{operation}\"")]
    Unsupported { resource: String, operation: String },
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// An action error annotated with the input item that produced it.
#[derive(Debug, Error)]
#[error("{source} [item {item_index}]")]
pub struct NodeError {
    pub item_index: usize,
    pub source: ActionError,
}

impl NodeError {
    pub fn new(item_index: usize, source: ActionError) -> Self {
        Self { item_index, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_displays_status() {
        let err = TransportError::Status {
            status_code: 404,
            message: "Not Found".into(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn transport_error_passes_through_action_error() {
        let err: ActionError = TransportError::Network("connection reset".into()).into();
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn node_error_carries_item_index() {
        let err = NodeError::new(3, ActionError::validation("Query parameter is required"));
        assert_eq!(err.item_index, 3);
        assert!(err.to_string().contains("[item 3]"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unsupported_names_both_selectors() {
        let err = ActionError::Unsupported {
            resource: "file".into(),
            operation: "renameFile".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unhandled resource/operation: \"file\" / \"renameFile\""
        );
    }
}

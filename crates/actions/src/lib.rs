//! Action handlers for the Pinecone Assistant node.
//!
//! One handler per resource/operation pair. Each validates its own inputs,
//! then composes dispatcher calls through the shared [`ApiClient`].
//!
//! [`ApiClient`]: pinecone_assistant_client::ApiClient

pub mod action;
pub mod delete_file;
pub mod files;
pub mod get_context_snippets;
pub mod list_assistants;
pub mod list_files;
pub mod params;
pub mod update_file;
pub mod upload_file;

#[cfg(test)]
mod test_helpers;

pub use action::{Action, ActionContext, ActionRegistry};

/// A registry with every supported operation.
pub fn default_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(Box::new(list_assistants::ListAssistantsAction));
    registry.register(Box::new(list_files::ListFilesAction));
    registry.register(Box::new(upload_file::UploadFileAction));
    registry.register(Box::new(update_file::UpdateFileAction));
    registry.register(Box::new(delete_file::DeleteFileAction));
    registry.register(Box::new(get_context_snippets::GetContextSnippetsAction));
    registry
}

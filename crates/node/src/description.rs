//! The node's self-description: what the host renders in its node picker
//! and operation dropdowns.

use pinecone_assistant_actions::ActionRegistry;
use pinecone_assistant_config::AppConfig;
use pinecone_assistant_core::{Operation, Resource};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub version: u32,
    pub description: String,
    pub credentials: Vec<String>,
    pub resources: Vec<ResourceOption>,
    pub operations: Vec<OperationOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOption {
    pub resource: String,
    pub name: String,
    pub value: String,
    pub description: String,
    pub action: String,
}

fn operation_name(operation: Operation) -> &'static str {
    match operation {
        Operation::ListAssistants => "List Assistants",
        Operation::ListFiles => "List Files",
        Operation::UploadFile => "Upload File",
        Operation::UpdateFile => "Update File",
        Operation::DeleteFile => "Delete File",
        Operation::GetContextSnippets => "Get Context Snippets",
    }
}

/// "List Files" -> "List files"
fn action_label(name: &str) -> String {
    let mut words = name.split(' ');
    let first = words.next().unwrap_or_default().to_string();
    words.fold(first, |label, word| format!("{label} {}", word.to_lowercase()))
}

impl NodeDescription {
    /// Describe the operations `registry` can serve.
    pub fn new(registry: &ActionRegistry, config: &AppConfig) -> Self {
        let operations: Vec<OperationOption> = registry
            .operations()
            .into_iter()
            .filter_map(|(resource, operation)| {
                let action = registry.get(resource, operation)?;
                let name = operation_name(operation);
                Some(OperationOption {
                    resource: resource.as_str().into(),
                    name: name.into(),
                    value: operation.as_str().into(),
                    description: action.description().into(),
                    action: action_label(name),
                })
            })
            .collect();

        let resources = Resource::ALL
            .iter()
            .filter(|r| operations.iter().any(|o| o.resource == r.as_str()))
            .map(|r| ResourceOption {
                name: r.display_name().into(),
                value: r.as_str().into(),
            })
            .collect();

        Self {
            display_name: "Pinecone Assistant".into(),
            name: "pineconeAssistant".into(),
            version: 1,
            description: "Manage files and retrieve context from a Pinecone Assistant".into(),
            credentials: vec![config.api.credential_name.clone()],
            resources,
            operations,
        }
    }
}

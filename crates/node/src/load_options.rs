//! Dynamic option lists for the node form.

use pinecone_assistant_client::ApiClient;
use pinecone_assistant_core::{ActionError, ApiRequest, AssistantRef, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a dropdown: display name and the value stored in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
struct AssistantList {
    #[serde(default)]
    assistants: Vec<Value>,
}

/// An assistant as listed by the control plane. Assistants that are still
/// initializing may not have a host yet.
#[derive(Debug, Default, Deserialize)]
struct AssistantEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    host: Option<String>,
}

impl AssistantEntry {
    /// Entries that do not decode, or lack a name or host, are skipped.
    fn decode(entry: Value) -> Option<AssistantRef> {
        let entry: AssistantEntry = serde_json::from_value(entry).ok()?;
        match (entry.name, entry.host) {
            (Some(name), Some(host)) if !name.is_empty() && !host.is_empty() => {
                Some(AssistantRef::new(name, host))
            }
            _ => None,
        }
    }
}

/// Assistants on the account, valued by their assistant token.
pub async fn get_assistants(client: &ApiClient) -> Result<Vec<OptionEntry>, ActionError> {
    let request = ApiRequest::get(client.control_plane_url(), "assistants");
    let response = client.send(request, None).await?;
    let list: AssistantList = if response.is_null() {
        AssistantList::default()
    } else {
        serde_json::from_value(response).map_err(|e| TransportError::Decode(e.to_string()))?
    };

    Ok(list
        .assistants
        .into_iter()
        .filter_map(AssistantEntry::decode)
        .map(|assistant| OptionEntry {
            value: assistant.to_token(),
            name: assistant.name,
        })
        .collect())
}

//! File helpers shared by the file actions.
//!
//! Pinecone does not index files by the caller's id, so every operation
//! keyed on an external file id first lists the assistant's files filtered
//! on the `external_file_id` metadata field.

use pinecone_assistant_client::ApiClient;
use pinecone_assistant_core::{
    ActionError, ApiRequest, AssistantRef, BinaryData, FilePart, MetadataFilter, RequestBody,
    TransportError,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Metadata key the external file id is stored under.
pub const EXTERNAL_ID_KEY: &str = "external_file_id";

/// Multipart field carrying the file bytes.
const FILE_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    id: String,
}

fn files_endpoint(assistant: &AssistantRef) -> String {
    format!("files/{}", assistant.name)
}

/// List an assistant's files, optionally filtered.
pub async fn get_files(
    client: &ApiClient,
    assistant: &AssistantRef,
    filter: &MetadataFilter,
    source_tag: Option<&str>,
) -> Result<Value, ActionError> {
    let mut request = ApiRequest::get(&assistant.host, files_endpoint(assistant));
    if let Some(filter) = filter.to_value() {
        request = request.with_query("filter", filter.to_string());
    }
    Ok(client.send(request, source_tag).await?)
}

/// Internal ids of every file tagged with `external_id`, in response order.
pub async fn file_ids_by_external_id(
    client: &ApiClient,
    assistant: &AssistantRef,
    external_id: &str,
    source_tag: Option<&str>,
) -> Result<Vec<String>, ActionError> {
    let filter = MetadataFilter::Simple(BTreeMap::from([(
        EXTERNAL_ID_KEY.to_string(),
        external_id.to_string(),
    )]));
    let response = get_files(client, assistant, &filter, source_tag).await?;
    let list: FileList = if response.is_null() {
        FileList::default()
    } else {
        serde_json::from_value(response).map_err(|e| TransportError::Decode(e.to_string()))?
    };
    let ids: Vec<String> = list.files.into_iter().map(|f| f.id).collect();
    debug!(external_id, matches = ids.len(), "Resolved external file id");
    Ok(ids)
}

/// Delete files one at a time, stopping at the first failure.
pub async fn delete_files_by_ids(
    client: &ApiClient,
    assistant: &AssistantRef,
    ids: &[String],
    source_tag: Option<&str>,
) -> Result<(), ActionError> {
    for id in ids {
        let endpoint = format!("{}/{id}", files_endpoint(assistant));
        client
            .send(ApiRequest::delete(&assistant.host, endpoint), source_tag)
            .await?;
    }
    Ok(())
}

/// A file to upload, with the metadata to attach.
#[derive(Debug, Clone)]
pub struct FileUpload<'a> {
    pub external_id: &'a str,
    pub binary: &'a BinaryData,
    pub metadata: Option<BTreeMap<String, String>>,
}

impl FileUpload<'_> {
    /// Supplied metadata plus the external id, which always wins.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut metadata = self.metadata.clone().unwrap_or_default();
        metadata.insert(EXTERNAL_ID_KEY.into(), self.external_id.into());
        metadata
    }

    fn file_part(&self) -> FilePart {
        FilePart {
            field_name: FILE_FIELD.into(),
            file_name: self
                .binary
                .file_name
                .clone()
                .unwrap_or_else(|| FILE_FIELD.into()),
            mime_type: self.binary.mime_type.clone(),
            data: self.binary.data.clone(),
        }
    }
}

/// Upload one file as multipart, metadata in the query string.
pub async fn upload_file(
    client: &ApiClient,
    assistant: &AssistantRef,
    upload: &FileUpload<'_>,
    source_tag: Option<&str>,
) -> Result<Value, ActionError> {
    let metadata = serde_json::to_string(&upload.metadata())
        .map_err(|e| ActionError::validation(format!("Invalid file metadata: {e}")))?;
    let request = ApiRequest::post(&assistant.host, files_endpoint(assistant))
        .with_query("metadata", metadata)
        .with_body(RequestBody::Multipart {
            fields: Vec::new(),
            file: upload.file_part(),
        });
    Ok(client.send(request, source_tag).await?)
}

//! Replace every file carrying an external id with a new upload.
//!
//! Deletes first, then uploads. There is no rollback: if the upload fails
//! the old files are already gone.

use async_trait::async_trait;
use pinecone_assistant_core::{ActionError, Operation};
use serde_json::Value;
use tracing::debug;

use crate::action::{Action, ActionContext};
use crate::files::{FileUpload, delete_files_by_ids, file_ids_by_external_id, upload_file};
use crate::params::{FileWriteParams, require_external_id};

pub struct UpdateFileAction;

#[async_trait]
impl Action for UpdateFileAction {
    fn operation(&self) -> Operation {
        Operation::UpdateFile
    }

    fn description(&self) -> &str {
        "Replace an assistant file identified by its external file ID"
    }

    async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError> {
        let params: FileWriteParams = ctx.params(index)?;
        let external_id = require_external_id(
            params.external_file_id,
            "External file ID is required to update a file.",
        )?;
        let binary = ctx.item(index)?.require_binary(&params.input_data_field_name)?;

        let assistant = &params.assistant_data;
        let fields = &params.additional_fields;
        let source_tag = fields.source_tag.as_deref();

        let existing = file_ids_by_external_id(ctx.client, assistant, &external_id, source_tag).await?;
        debug!(
            external_id = %external_id,
            replaced = existing.len(),
            "Replacing assistant files"
        );
        delete_files_by_ids(ctx.client, assistant, &existing, source_tag).await?;

        let upload = FileUpload {
            external_id: &external_id,
            binary,
            metadata: fields.metadata.as_ref().and_then(|m| m.to_map()),
        };
        let response = upload_file(ctx.client, assistant, &upload, source_tag).await?;
        Ok(vec![response])
    }
}

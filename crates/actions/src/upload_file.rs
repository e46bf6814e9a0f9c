//! Upload a binary item to an assistant, tagged with an external file id.

use async_trait::async_trait;
use pinecone_assistant_core::{ActionError, Operation};
use serde_json::Value;

use crate::action::{Action, ActionContext};
use crate::files::{FileUpload, upload_file};
use crate::params::{FileWriteParams, require_external_id};

pub struct UploadFileAction;

#[async_trait]
impl Action for UploadFileAction {
    fn operation(&self) -> Operation {
        Operation::UploadFile
    }

    fn description(&self) -> &str {
        "Upload a file to an assistant"
    }

    async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError> {
        let params: FileWriteParams = ctx.params(index)?;
        let external_id = require_external_id(
            params.external_file_id,
            "An external file ID is required to upload a file.",
        )?;
        let binary = ctx.item(index)?.require_binary(&params.input_data_field_name)?;

        let fields = &params.additional_fields;
        let upload = FileUpload {
            external_id: &external_id,
            binary,
            metadata: fields.metadata.as_ref().and_then(|m| m.to_map()),
        };
        let response = upload_file(
            ctx.client,
            &params.assistant_data,
            &upload,
            fields.source_tag.as_deref(),
        )
        .await?;
        Ok(vec![response])
    }
}

//! List an assistant's files, optionally filtered by metadata.

use async_trait::async_trait;
use pinecone_assistant_core::{ActionError, Operation};
use serde_json::Value;

use crate::action::{Action, ActionContext};
use crate::files::get_files;
use crate::params::ListFilesParams;

pub struct ListFilesAction;

#[async_trait]
impl Action for ListFilesAction {
    fn operation(&self) -> Operation {
        Operation::ListFiles
    }

    fn description(&self) -> &str {
        "List files uploaded to an assistant"
    }

    async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError> {
        let params: ListFilesParams = ctx.params(index)?;
        let fields = &params.additional_fields;
        let filter = fields.filter()?;

        let response = get_files(
            ctx.client,
            &params.assistant_data,
            &filter,
            fields.source_tag.as_deref(),
        )
        .await?;
        Ok(vec![response])
    }
}

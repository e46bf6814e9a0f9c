//! Delete every file carrying an external id.

use async_trait::async_trait;
use pinecone_assistant_core::{ActionError, Operation};
use serde_json::{Value, json};

use crate::action::{Action, ActionContext};
use crate::files::{delete_files_by_ids, file_ids_by_external_id};
use crate::params::{DeleteFileParams, require_external_id};

pub struct DeleteFileAction;

#[async_trait]
impl Action for DeleteFileAction {
    fn operation(&self) -> Operation {
        Operation::DeleteFile
    }

    fn description(&self) -> &str {
        "Delete an assistant file identified by its external file ID"
    }

    async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError> {
        let params: DeleteFileParams = ctx.params(index)?;
        let external_id = require_external_id(
            params.external_file_id,
            "External file ID is required to delete a file.",
        )?;
        let assistant = &params.assistant_data;
        let source_tag = params.additional_fields.source_tag.as_deref();

        let ids = file_ids_by_external_id(ctx.client, assistant, &external_id, source_tag).await?;
        if ids.is_empty() {
            return Err(ActionError::NotFound(format!(
                "File with external file ID {external_id} not found."
            )));
        }
        delete_files_by_ids(ctx.client, assistant, &ids, source_tag).await?;
        Ok(vec![json!({ "deleted": true })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedTransport, client, token};
    use pinecone_assistant_core::{HttpMethod, StaticParameters};
    use std::sync::Arc;

    const FILES: &str = "https://prod-1-data.ke.pinecone.io/assistant/files/test-assistant";

    async fn run(params: Value, transport: Arc<ScriptedTransport>) -> Result<Vec<Value>, ActionError> {
        let client = client(transport);
        let params = StaticParameters(params);
        let ctx = ActionContext::new(&client, &params, &[]);
        DeleteFileAction.execute(&ctx, 0).await
    }

    #[tokio::test]
    async fn deletes_each_match_in_lookup_order() {
        let transport = Arc::new(ScriptedTransport::ok(vec![
            json!({"files": [{"id": "file-456"}, {"id": "file-789"}]}),
            Value::Null,
            Value::Null,
        ]));
        let out = run(
            json!({"assistantData": token(), "externalFileId": "external-123"}),
            transport.clone(),
        )
        .await
        .unwrap();
        assert_eq!(out, vec![json!({"deleted": true})]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0].query_value("filter"),
            Some(r#"{"external_file_id":"external-123"}"#)
        );
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].url, format!("{FILES}/file-456"));
        assert_eq!(requests[2].url, format!("{FILES}/file-789"));
        assert!(requests[1].json);
    }

    #[tokio::test]
    async fn zero_matches_is_not_found() {
        let transport = Arc::new(ScriptedTransport::ok(vec![json!({"files": []})]));
        let err = run(
            json!({"assistantData": token(), "externalFileId": "external-123"}),
            transport.clone(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ActionError::NotFound(_)));
        assert_eq!(err.to_string(), "File with external file ID external-123 not found.");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_external_id_fails_without_a_call() {
        let transport = Arc::new(ScriptedTransport::ok(vec![]));
        let err = run(
            json!({"assistantData": token(), "externalFileId": ""}),
            transport.clone(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(transport.call_count(), 0);
    }
}

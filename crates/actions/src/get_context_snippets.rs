//! Retrieve ranked context snippets for a query.

use async_trait::async_trait;
use pinecone_assistant_core::{ActionError, ApiRequest, Operation, RequestBody};
use serde::Serialize;
use serde_json::Value;

use crate::action::{Action, ActionContext};
use crate::params::ContextSnippetParams;

/// Request body of the context endpoint.
#[derive(Debug, Serialize)]
struct ContextRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snippet_size: Option<u32>,
}

pub struct GetContextSnippetsAction;

#[async_trait]
impl Action for GetContextSnippetsAction {
    fn operation(&self) -> Operation {
        Operation::GetContextSnippets
    }

    fn description(&self) -> &str {
        "Retrieve context snippets relevant to a query"
    }

    async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError> {
        let params: ContextSnippetParams = ctx.params(index)?;
        let query = params
            .query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ActionError::validation("Query parameter is required and cannot be empty"))?;

        let fields = &params.additional_fields;
        let body = ContextRequest {
            query,
            filter: fields.filter.filter()?.to_value(),
            top_k: fields.top_k,
            snippet_size: fields.snippet_size,
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| ActionError::validation(format!("Invalid context request: {e}")))?;

        let assistant = &params.assistant_data;
        let request = ApiRequest::post(&assistant.host, format!("chat/{}/context", assistant.name))
            .with_body(RequestBody::Json(body));
        let response = ctx
            .client
            .send(request, fields.filter.source_tag.as_deref())
            .await?;
        Ok(vec![response])
    }
}

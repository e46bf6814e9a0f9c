//! List assistants on the account.

use async_trait::async_trait;
use pinecone_assistant_core::{ActionError, ApiRequest, Operation};
use serde_json::Value;

use crate::action::{Action, ActionContext};

pub struct ListAssistantsAction;

#[async_trait]
impl Action for ListAssistantsAction {
    fn operation(&self) -> Operation {
        Operation::ListAssistants
    }

    fn description(&self) -> &str {
        "List all assistants in the project"
    }

    async fn execute(&self, ctx: &ActionContext<'_>, _index: usize) -> Result<Vec<Value>, ActionError> {
        let request = ApiRequest::get(ctx.client.control_plane_url(), "assistants");
        let response = ctx.client.send(request, None).await?;
        Ok(vec![response])
    }
}

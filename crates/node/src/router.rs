//! Node router: picks the action for the selected resource/operation and
//! runs it over every input item.
//!
//! Items are processed one at a time, in order. A failing item either
//! becomes an error record (continue-on-fail) or aborts the run.

use pinecone_assistant_actions::{ActionContext, ActionRegistry, default_registry};
use pinecone_assistant_client::{ApiClient, ClientError};
use pinecone_assistant_config::AppConfig;
use pinecone_assistant_core::{ActionError, NodeError, NodeItem, ParameterSource, json_array};
use tracing::{info, warn};

/// The Pinecone Assistant node.
pub struct AssistantNode {
    registry: ActionRegistry,
    client: ApiClient,
    continue_on_fail: bool,
}

impl AssistantNode {
    /// A node with every built-in action.
    pub fn new(client: ApiClient) -> Self {
        Self::with_registry(default_registry(), client)
    }

    pub fn with_registry(registry: ActionRegistry, client: ApiClient) -> Self {
        Self {
            registry,
            client,
            continue_on_fail: false,
        }
    }

    /// Build a node talking to Pinecone over HTTP.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Ok(Self::new(ApiClient::from_config(config)?).with_continue_on_fail(config.continue_on_fail))
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Run the node with its configured failure mode.
    pub async fn run(
        &self,
        items: &[NodeItem],
        params: &dyn ParameterSource,
    ) -> Result<Vec<NodeItem>, NodeError> {
        self.execute(items, params, self.continue_on_fail).await
    }

    /// Run the node over `items`.
    ///
    /// The `resource` and `operation` selectors are read from the first
    /// item's parameters and apply to the whole run.
    pub async fn execute(
        &self,
        items: &[NodeItem],
        params: &dyn ParameterSource,
        continue_on_fail: bool,
    ) -> Result<Vec<NodeItem>, NodeError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let resource = params.get_str("resource", 0);
        let operation = params.get_str("operation", 0);
        let action = self.registry.lookup(&resource, &operation);
        info!(
            resource = %resource,
            operation = %operation,
            items = items.len(),
            "Executing Pinecone Assistant node"
        );

        let ctx = ActionContext::new(&self.client, params, items);
        let mut output = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let result = match action {
                Some(action) => action.execute(&ctx, index).await,
                None => Err(ActionError::Unsupported {
                    resource: resource.clone(),
                    operation: operation.clone(),
                }),
            };

            match result {
                Ok(values) => output.extend(
                    values
                        .into_iter()
                        .flat_map(json_array)
                        .map(|json| NodeItem::new(json).paired(index)),
                ),
                Err(e) if continue_on_fail => {
                    warn!(item = index, error = %e, "Item failed, continuing");
                    output.push(NodeItem {
                        json: item.json.clone(),
                        error: Some(e.to_string()),
                        ..NodeItem::default()
                    }
                    .paired(index));
                }
                Err(e) => return Err(NodeError::new(index, e)),
            }
        }

        Ok(output)
    }
}

//! Action trait: one user-facing operation of the node.
//!
//! Each resource/operation pair (list files, upload file, get context
//! snippets, ...) implements this trait. Actions are registered in the
//! [`ActionRegistry`] and the router picks one per run.

use async_trait::async_trait;
use pinecone_assistant_client::ApiClient;
use pinecone_assistant_core::params::decode;
use pinecone_assistant_core::{ActionError, NodeItem, Operation, ParameterSource, Resource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Everything an action may touch while handling one item.
pub struct ActionContext<'a> {
    pub client: &'a ApiClient,
    pub params: &'a dyn ParameterSource,
    pub items: &'a [NodeItem],
}

impl<'a> ActionContext<'a> {
    pub fn new(client: &'a ApiClient, params: &'a dyn ParameterSource, items: &'a [NodeItem]) -> Self {
        Self {
            client,
            params,
            items,
        }
    }

    /// The item's parameters, decoded into the action's typed struct.
    pub fn params<T: DeserializeOwned>(&self, index: usize) -> Result<T, ActionError> {
        decode(self.params.resolve(index), index)
    }

    pub fn item(&self, index: usize) -> Result<&'a NodeItem, ActionError> {
        self.items
            .get(index)
            .ok_or_else(|| ActionError::validation(format!("No input item at index {index}")))
    }
}

/// The core Action trait.
#[async_trait]
pub trait Action: Send + Sync {
    /// The operation selector value this action answers to.
    fn operation(&self) -> Operation;

    fn resource(&self) -> Resource {
        self.operation().resource()
    }

    /// A short description shown in the host's operation picker.
    fn description(&self) -> &str;

    /// Handle input item `index`, returning the JSON payloads to emit.
    async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError>;
}

/// A registry of available actions keyed by resource and operation.
pub struct ActionRegistry {
    actions: HashMap<(Resource, Operation), Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action. Replaces any existing action for the same pair.
    pub fn register(&mut self, action: Box<dyn Action>) {
        self.actions
            .insert((action.resource(), action.operation()), action);
    }

    pub fn get(&self, resource: Resource, operation: Operation) -> Option<&dyn Action> {
        self.actions.get(&(resource, operation)).map(|a| a.as_ref())
    }

    /// Look up by the raw selector strings the host sends.
    pub fn lookup(&self, resource: &str, operation: &str) -> Option<&dyn Action> {
        let resource = resource.parse().ok()?;
        let operation = operation.parse().ok()?;
        self.get(resource, operation)
    }

    /// All registered pairs, sorted for stable output.
    pub fn operations(&self) -> Vec<(Resource, Operation)> {
        let mut pairs: Vec<_> = self.actions.keys().copied().collect();
        pairs.sort_by_key(|(r, o)| (r.as_str(), o.as_str()));
        pairs
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedTransport, client};
    use pinecone_assistant_core::StaticParameters;
    use serde_json::json;
    use std::sync::Arc;

    /// Echoes the item's parameters back.
    struct EchoAction;

    #[async_trait]
    impl Action for EchoAction {
        fn operation(&self) -> Operation {
            Operation::ListFiles
        }
        fn description(&self) -> &str {
            "Echoes back the parameters"
        }
        async fn execute(&self, ctx: &ActionContext<'_>, index: usize) -> Result<Vec<Value>, ActionError> {
            let params: Value = ctx.params(index)?;
            Ok(vec![params])
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ActionRegistry::new();
        registry.register(Box::new(EchoAction));
        assert!(registry.lookup("file", "listFiles").is_some());
        assert!(registry.lookup("file", "deleteFile").is_none());
        assert!(registry.lookup("assistant", "listFiles").is_none());
        assert!(registry.lookup("folder", "listFiles").is_none());
    }

    #[test]
    fn registry_lists_operations() {
        let mut registry = ActionRegistry::new();
        registry.register(Box::new(EchoAction));
        assert_eq!(registry.operations(), vec![(Resource::File, Operation::ListFiles)]);
    }

    #[tokio::test]
    async fn context_decodes_parameters() {
        let client = client(Arc::new(ScriptedTransport::ok(vec![])));
        let params = StaticParameters(json!({"query": "hello"}));
        let ctx = ActionContext::new(&client, &params, &[]);
        let out = EchoAction.execute(&ctx, 0).await.unwrap();
        assert_eq!(out, vec![json!({"query": "hello"})]);
        assert!(ctx.item(0).is_err());
    }
}

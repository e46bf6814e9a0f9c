//! Parameter resolution. The host evaluates the node's form per item.
//!
//! Handlers never see the raw parameter bag: they deserialize it into a
//! typed struct for their operation via [`ParameterSource::typed`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ActionError;

/// Resolves the node parameters for one input item.
pub trait ParameterSource: Send + Sync {
    /// The full parameter object for `item_index`, or `None` when the host
    /// has nothing for that item.
    fn resolve(&self, item_index: usize) -> Option<Value>;

    /// A single named parameter.
    fn get(&self, name: &str, item_index: usize) -> Option<Value> {
        self.resolve(item_index)
            .and_then(|params| params.get(name).cloned())
            .filter(|value| !value.is_null())
    }

    /// A single named string parameter, empty when absent.
    fn get_str(&self, name: &str, item_index: usize) -> String {
        match self.get(name, item_index) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Deserialize the item's parameters into an operation's typed struct.
    fn typed<T: DeserializeOwned>(&self, item_index: usize) -> Result<T, ActionError>
    where
        Self: Sized,
    {
        decode(self.resolve(item_index), item_index)
    }
}

/// Deserialize parameters; shared by the default method and trait objects.
pub fn decode<T: DeserializeOwned>(params: Option<Value>, item_index: usize) -> Result<T, ActionError> {
    let params = params.unwrap_or_else(|| Value::Object(Default::default()));
    serde_json::from_value(params).map_err(|e| {
        ActionError::validation(format!("Invalid parameters for item {item_index}: {e}"))
    })
}

/// The same parameters for every item.
#[derive(Debug, Clone)]
pub struct StaticParameters(pub Value);

impl ParameterSource for StaticParameters {
    fn resolve(&self, _item_index: usize) -> Option<Value> {
        Some(self.0.clone())
    }
}

/// Parameters already evaluated per item by the host.
#[derive(Debug, Clone, Default)]
pub struct PerItemParameters(pub Vec<Value>);

impl ParameterSource for PerItemParameters {
    fn resolve(&self, item_index: usize) -> Option<Value> {
        self.0.get(item_index).cloned()
    }
}

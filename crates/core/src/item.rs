//! Items flowing in and out of the node.
//!
//! Mirrors the host's item envelope: a JSON payload, named binary
//! attachments, the index of the input item it was produced from, and an
//! error message when the item records a continue-on-fail failure.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ActionError;

/// Binary payload attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    /// Raw bytes; base64 in the serialized form.
    #[serde(serialize_with = "to_base64", deserialize_with = "from_base64")]
    pub data: Vec<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "application/octet-stream".into()
}

impl BinaryData {
    pub fn new(data: impl Into<Vec<u8>>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            file_name: Some(file_name.into()),
            mime_type: mime_type.into(),
        }
    }
}

fn to_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

fn from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
}

/// One item of node input or output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeItem {
    #[serde(default)]
    pub json: Value,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub binary: HashMap<String, BinaryData>,

    /// Index of the input item this output was produced from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NodeItem {
    pub fn new(json: Value) -> Self {
        Self {
            json,
            ..Self::default()
        }
    }

    pub fn with_binary(mut self, field: impl Into<String>, data: BinaryData) -> Self {
        self.binary.insert(field.into(), data);
        self
    }

    pub fn paired(mut self, index: usize) -> Self {
        self.paired_item = Some(index);
        self
    }

    /// Look up a binary field, failing the way the host does when it is absent.
    pub fn require_binary(&self, field: &str) -> Result<&BinaryData, ActionError> {
        self.binary.get(field).ok_or_else(|| {
            ActionError::validation(format!("No binary data property \"{field}\" exists on item!"))
        })
    }
}

/// Normalise an API response into output payloads: arrays fan out one
/// payload per element, null yields nothing, anything else is one payload.
pub fn json_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(values) => values,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

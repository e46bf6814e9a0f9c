//! Metadata filter construction.
//!
//! The host form offers two ways to express a filter: a list of key/value
//! pairs (exact matches) and a raw JSON filter expression for operators like
//! `$or`, `$in` or `$gt`. At most one may be set per call; both collapse into
//! a single [`MetadataFilter`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::ActionError;

/// Name of the raw-expression field, used in validation messages.
pub const RAW_FILTER_FIELD: &str = "advancedMetadataFilter";

/// One key/value row of a metadata collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The host's key/value collection wrapper: `{"metadataValues": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataValues {
    #[serde(default)]
    pub metadata_values: Vec<MetadataEntry>,
}

impl MetadataValues {
    pub fn new(entries: Vec<MetadataEntry>) -> Self {
        Self {
            metadata_values: entries,
        }
    }

    /// Flatten into a key/value map. Later duplicate keys win.
    /// Returns `None` when there are no entries.
    pub fn to_map(&self) -> Option<BTreeMap<String, String>> {
        if self.metadata_values.is_empty() {
            return None;
        }
        Some(
            self.metadata_values
                .iter()
                .map(|entry| (entry.key.clone(), entry.value.clone()))
                .collect(),
        )
    }
}

/// A resolved metadata filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MetadataFilter {
    #[default]
    None,
    /// Exact-match key/value pairs.
    Simple(BTreeMap<String, String>),
    /// A pre-formed filter expression, passed through untouched.
    Raw(Value),
}

impl MetadataFilter {
    /// Build from the key/value collection alone.
    pub fn from_values(values: Option<&MetadataValues>) -> Self {
        match values.and_then(MetadataValues::to_map) {
            Some(map) => Self::Simple(map),
            None => Self::None,
        }
    }

    /// Build from a raw expression: a JSON string to parse, or an
    /// already-structured value. Null and blank strings mean "no filter".
    pub fn from_raw(raw: &Value) -> Result<Self, ActionError> {
        match raw {
            Value::Null => Ok(Self::None),
            Value::String(text) if text.trim().is_empty() => Ok(Self::None),
            Value::String(text) => serde_json::from_str(text)
                .map(Self::Raw)
                .map_err(|e| {
                    ActionError::validation(format!("Invalid JSON in {RAW_FILTER_FIELD}: {e}"))
                }),
            other => Ok(Self::Raw(other.clone())),
        }
    }

    /// Resolve the mutually exclusive pair into one filter.
    ///
    /// Setting both fails before their contents are looked at.
    pub fn resolve(
        values: Option<&MetadataValues>,
        raw: Option<&Value>,
    ) -> Result<Self, ActionError> {
        let raw = raw.filter(|value| is_supplied(value));
        match (values, raw) {
            (Some(_), Some(_)) => Err(ActionError::validation(
                "Only one of metadataFilter or advancedMetadataFilter can be set, not both",
            )),
            (_, Some(raw)) => Self::from_raw(raw),
            (values, None) => Ok(Self::from_values(values)),
        }
    }

    /// The JSON form sent to the API, or `None` when nothing would filter.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Simple(map) if map.is_empty() => None,
            Self::Simple(map) => serde_json::to_value(map).ok(),
            Self::Raw(Value::Object(map)) if map.is_empty() => None,
            Self::Raw(value) => Some(value.clone()),
        }
    }

    pub fn is_none(&self) -> bool {
        self.to_value().is_none()
    }
}

fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> MetadataValues {
        MetadataValues::new(pairs.iter().map(|(k, v)| MetadataEntry::new(*k, *v)).collect())
    }

    #[test]
    fn entries_become_flat_map() {
        let filter = MetadataFilter::from_values(Some(&values(&[
            ("category", "technology"),
            ("year", "2024"),
        ])));
        assert_eq!(
            filter.to_value(),
            Some(json!({"category": "technology", "year": "2024"}))
        );
    }

    #[test]
    fn empty_or_absent_collection_is_no_filter() {
        assert_eq!(MetadataFilter::from_values(None), MetadataFilter::None);
        assert_eq!(
            MetadataFilter::from_values(Some(&MetadataValues::default())),
            MetadataFilter::None
        );
    }

    #[test]
    fn later_duplicate_key_wins() {
        let filter = MetadataFilter::from_values(Some(&values(&[("a", "1"), ("a", "2")])));
        assert_eq!(filter.to_value(), Some(json!({"a": "2"})));
    }

    #[test]
    fn raw_string_is_parsed() {
        let raw = json!(r#"{"$and":[{"category":{"$eq":"technology"}},{"year":{"$gte":2023}}]}"#);
        let filter = MetadataFilter::from_raw(&raw).unwrap();
        assert_eq!(
            filter.to_value(),
            Some(json!({"$and": [{"category": {"$eq": "technology"}}, {"year": {"$gte": 2023}}]}))
        );
    }

    #[test]
    fn raw_object_passes_through() {
        let raw = json!({"category": {"$eq": "documentation"}});
        let filter = MetadataFilter::from_raw(&raw).unwrap();
        assert_eq!(filter, MetadataFilter::Raw(raw));
    }

    #[test]
    fn malformed_raw_names_field_and_parse_error() {
        let err = MetadataFilter::from_raw(&json!("{ invalid json }")).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ActionError::Validation(_)));
        assert!(message.starts_with("Invalid JSON in advancedMetadataFilter"));
        assert!(message.contains("key must be a string"));
    }

    #[test]
    fn blank_raw_is_no_filter() {
        assert_eq!(MetadataFilter::from_raw(&json!("   ")).unwrap(), MetadataFilter::None);
        assert_eq!(MetadataFilter::from_raw(&Value::Null).unwrap(), MetadataFilter::None);
    }

    #[test]
    fn both_set_fails_regardless_of_content() {
        let cases = [
            (values(&[("category", "technology")]), json!({"$and": []})),
            (MetadataValues::default(), json!("{ invalid json }")),
            (values(&[("a", "b")]), json!("{}")),
        ];
        for (simple, raw) in cases {
            let err = MetadataFilter::resolve(Some(&simple), Some(&raw)).unwrap_err();
            assert!(err.to_string().contains("Only one of metadataFilter"));
        }
    }

    #[test]
    fn blank_raw_does_not_count_as_set() {
        let simple = values(&[("category", "doc")]);
        for raw in [json!(""), json!("   "), json!(" \n\t"), Value::Null] {
            let filter = MetadataFilter::resolve(Some(&simple), Some(&raw)).unwrap();
            assert_eq!(filter.to_value(), Some(json!({"category": "doc"})));
        }
    }

    #[test]
    fn resolve_picks_whichever_is_set() {
        let simple = values(&[("k", "v")]);
        assert_eq!(
            MetadataFilter::resolve(Some(&simple), None).unwrap().to_value(),
            Some(json!({"k": "v"}))
        );
        assert_eq!(
            MetadataFilter::resolve(None, Some(&json!(r#"{"k":{"$ne":"v"}}"#)))
                .unwrap()
                .to_value(),
            Some(json!({"k": {"$ne": "v"}}))
        );
        assert!(MetadataFilter::resolve(None, None).unwrap().is_none());
    }

    #[test]
    fn empty_raw_object_is_no_filter() {
        let filter = MetadataFilter::from_raw(&json!("{}")).unwrap();
        assert!(filter.is_none());
    }
}

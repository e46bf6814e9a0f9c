//! Typed parameters per operation.
//!
//! Field names follow the host form (camelCase). The host's free-form
//! "additional fields" collections become explicit structs; the two filter
//! fields are collapsed into a [`MetadataFilter`] at validation time.

use pinecone_assistant_core::{ActionError, AssistantRef, MetadataFilter, MetadataValues};
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Treat an explicit `null` like a missing field.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A non-negative whole number, given either as an integer or as a float
/// with no fractional part (`5` or `5.0`). `null` means unset.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let number = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        _ => None,
    };
    number
        .and_then(|n| u32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("expected a whole number, got {value}")))
}

fn default_input_field() -> String {
    "data".into()
}

/// Optional metadata filter pair plus source tag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFields {
    #[serde(default)]
    pub metadata_filter: Option<MetadataValues>,
    #[serde(default)]
    pub advanced_metadata_filter: Option<Value>,
    #[serde(default)]
    pub source_tag: Option<String>,
}

impl FilterFields {
    pub fn filter(&self) -> Result<MetadataFilter, ActionError> {
        MetadataFilter::resolve(
            self.metadata_filter.as_ref(),
            self.advanced_metadata_filter.as_ref(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    pub assistant_data: AssistantRef,
    #[serde(default, deserialize_with = "or_default")]
    pub additional_fields: FilterFields,
}

/// Metadata attached to an uploaded file, plus source tag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFields {
    #[serde(default)]
    pub metadata: Option<MetadataValues>,
    #[serde(default)]
    pub source_tag: Option<String>,
}

/// Parameters shared by upload and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWriteParams {
    pub assistant_data: AssistantRef,
    #[serde(default)]
    pub external_file_id: Option<String>,
    #[serde(default = "default_input_field")]
    pub input_data_field_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub additional_fields: UploadFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTagFields {
    #[serde(default)]
    pub source_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    pub assistant_data: AssistantRef,
    #[serde(default)]
    pub external_file_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub additional_fields: SourceTagFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextFields {
    #[serde(default, deserialize_with = "whole_number")]
    pub top_k: Option<u32>,
    #[serde(default, deserialize_with = "whole_number")]
    pub snippet_size: Option<u32>,
    #[serde(flatten)]
    pub filter: FilterFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnippetParams {
    pub assistant_data: AssistantRef,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub additional_fields: ContextFields,
}

/// The external file id, or a validation error carrying `message`.
pub fn require_external_id(value: Option<String>, message: &str) -> Result<String, ActionError> {
    value
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ActionError::validation(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = r#"{"name":"test-assistant","host":"https://prod-1-data.ke.pinecone.io"}"#;

    #[test]
    fn null_additional_fields_default() {
        let params: ListFilesParams = serde_json::from_value(json!({
            "assistantData": TOKEN,
            "additionalFields": null,
        }))
        .unwrap();
        assert!(params.additional_fields.filter().unwrap().is_none());
    }

    #[test]
    fn missing_assistant_is_an_error() {
        let err = serde_json::from_value::<ListFilesParams>(json!({})).unwrap_err();
        assert!(err.to_string().contains("assistantData"));
    }

    #[test]
    fn context_fields_flatten_filter_pair() {
        let params: ContextSnippetParams = serde_json::from_value(json!({
            "assistantData": TOKEN,
            "query": "q",
            "additionalFields": {
                "topK": 5,
                "metadataFilter": {"metadataValues": [{"key": "category", "value": "doc"}]},
                "sourceTag": "my tag",
            },
        }))
        .unwrap();
        let fields = params.additional_fields;
        assert_eq!(fields.top_k, Some(5));
        assert_eq!(fields.snippet_size, None);
        assert_eq!(fields.filter.source_tag.as_deref(), Some("my tag"));
        assert_eq!(
            fields.filter.filter().unwrap().to_value(),
            Some(json!({"category": "doc"}))
        );
    }

    fn context_fields(fields: Value) -> Result<ContextFields, serde_json::Error> {
        serde_json::from_value::<ContextSnippetParams>(json!({
            "assistantData": TOKEN,
            "additionalFields": fields,
        }))
        .map(|params| params.additional_fields)
    }

    #[test]
    fn whole_floats_accepted_for_counts() {
        let fields = context_fields(json!({"topK": 5.0, "snippetSize": 2048.0})).unwrap();
        assert_eq!(fields.top_k, Some(5));
        assert_eq!(fields.snippet_size, Some(2048));

        let fields = context_fields(json!({"topK": null, "snippetSize": null})).unwrap();
        assert_eq!(fields.top_k, None);
        assert_eq!(fields.snippet_size, None);
    }

    #[test]
    fn fractional_or_negative_counts_rejected() {
        for bad in [json!(2.5), json!(-1), json!(-3.0), json!("5"), json!(5_000_000_000u64)] {
            let err = context_fields(json!({"topK": bad})).unwrap_err();
            assert!(err.to_string().contains("expected a whole number"), "{bad}: {err}");
        }
    }

    #[test]
    fn input_field_defaults_to_data() {
        let params: FileWriteParams = serde_json::from_value(json!({
            "assistantData": TOKEN,
            "externalFileId": "external-123",
        }))
        .unwrap();
        assert_eq!(params.input_data_field_name, "data");
    }

    #[test]
    fn empty_external_id_rejected() {
        assert!(require_external_id(Some(String::new()), "required").is_err());
        assert!(require_external_id(None, "required").is_err());
        assert_eq!(require_external_id(Some("x".into()), "required").unwrap(), "x");
    }
}

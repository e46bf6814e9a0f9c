//! Assistant references and their UI token form.
//!
//! The host transports the selected assistant as an opaque string: the JSON
//! encoding of `{"name": ..., "host": ...}`. Action parameters deserialize
//! straight from that string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ActionError;

/// One remote assistant instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AssistantToken")]
pub struct AssistantRef {
    pub name: String,
    pub host: String,
}

impl AssistantRef {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
        }
    }

    /// Encode as the string token used for UI option values.
    pub fn to_token(&self) -> String {
        serde_json::json!({ "name": self.name, "host": self.host }).to_string()
    }
}

impl fmt::Display for AssistantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.host)
    }
}

impl FromStr for AssistantRef {
    type Err = ActionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            host: String,
        }

        let raw: Raw = serde_json::from_str(token)
            .map_err(|e| ActionError::validation(format!("Invalid assistant selection: {e}")))?;
        if raw.name.is_empty() || raw.host.is_empty() {
            return Err(ActionError::validation(
                "Invalid assistant selection: name and host are required",
            ));
        }
        Ok(Self::new(raw.name, raw.host))
    }
}

/// Accepts either the string token or an already-structured object.
#[derive(Deserialize)]
#[serde(untagged)]
enum AssistantToken {
    Token(String),
    Object { name: String, host: String },
}

impl TryFrom<AssistantToken> for AssistantRef {
    type Error = ActionError;

    fn try_from(value: AssistantToken) -> Result<Self, Self::Error> {
        match value {
            AssistantToken::Token(token) => token.parse(),
            AssistantToken::Object { name, host } => Ok(Self::new(name, host)),
        }
    }
}

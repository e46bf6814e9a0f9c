//! Source tag normalization.
//!
//! Every request carries a `source_tag` in its `User-Agent` for attribution.
//! Tags are free text from the user, so they are squeezed into
//! `[a-z0-9_:]` before being sent.

use pinecone_assistant_config::SourceTagConfig;

#[derive(Debug, Clone)]
pub struct SourceTagger {
    /// Namespace marker including the trailing colon, e.g. `n8n:`.
    prefix: String,
    default_tag: String,
}

impl SourceTagger {
    pub fn new(namespace: &str, default_tag: impl Into<String>) -> Self {
        Self {
            prefix: format!("{namespace}:"),
            default_tag: default_tag.into(),
        }
    }

    /// Normalize `tag`, falling back to the default when absent or empty.
    ///
    /// 1. Prefix with the namespace marker unless already present
    /// 2. Lowercase
    /// 3. Drop characters outside `[a-z0-9_ :]`
    /// 4. Trim
    /// 5. Replace each run of spaces with one underscore
    pub fn normalize(&self, tag: Option<&str>) -> String {
        let tag = tag.filter(|t| !t.is_empty()).unwrap_or(self.default_tag.as_str());

        let prefixed = if tag.starts_with(self.prefix.as_str()) {
            tag.to_string()
        } else {
            format!("{}{tag}", self.prefix)
        };

        let filtered: String = prefixed
            .to_lowercase()
            .chars()
            .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | ' ' | ':'))
            .collect();

        let mut normalized = String::with_capacity(filtered.len());
        let mut in_spaces = false;
        for c in filtered.trim().chars() {
            if c == ' ' {
                if !in_spaces {
                    normalized.push('_');
                }
                in_spaces = true;
            } else {
                normalized.push(c);
                in_spaces = false;
            }
        }
        normalized
    }
}

impl From<&SourceTagConfig> for SourceTagger {
    fn from(config: &SourceTagConfig) -> Self {
        Self::new(&config.namespace, config.default_tag.clone())
    }
}

impl Default for SourceTagger {
    fn default() -> Self {
        Self::from(&SourceTagConfig::default())
    }
}

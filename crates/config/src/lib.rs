//! Configuration loading, validation, and management for the Pinecone
//! Assistant node.
//!
//! Loads configuration from `~/.pinecone-assistant/config.toml` with
//! environment variable overrides. Validates all settings at startup.
//! Everything the request layer treats as process-wide (package identity,
//! default source tag, API version) lives here and is injected, never read
//! from globals.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Package name reported in the `User-Agent` header.
pub const PACKAGE_NAME: &str = "pinecone-assistant-node";

/// Name under which the API-key credential is registered with the host.
pub const CREDENTIAL_NAME: &str = "pineconeAssistantApi";

/// The root configuration structure.
///
/// Maps directly to `~/.pinecone-assistant/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pinecone API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Continue with the next item when one fails
    #[serde(default)]
    pub continue_on_fail: bool,

    /// Package identity for client attribution
    #[serde(default)]
    pub package: PackageConfig,

    /// Source tag defaults
    #[serde(default)]
    pub source_tag: SourceTagConfig,

    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("continue_on_fail", &self.continue_on_fail)
            .field("package", &self.package)
            .field("source_tag", &self.source_tag)
            .field("api", &self.api)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default = "default_package_name")]
    pub name: String,

    #[serde(default = "default_package_version")]
    pub version: String,
}

fn default_package_name() -> String {
    PACKAGE_NAME.into()
}
fn default_package_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: default_package_name(),
            version: default_package_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTagConfig {
    /// Prefix marker every tag is namespaced under (without the colon)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Tag used when an operation doesn't supply one
    #[serde(default = "default_source_tag")]
    pub default_tag: String,
}

fn default_namespace() -> String {
    "n8n".into()
}
fn default_source_tag() -> String {
    "n8n_nodes_pinecone_assistant".into()
}

impl Default for SourceTagConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            default_tag: default_source_tag(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Account-level host, used for listing assistants
    #[serde(default = "default_control_plane_url")]
    pub control_plane_url: String,

    /// Value of the `X-Pinecone-API-Version` header
    #[serde(default = "default_api_version")]
    pub version: String,

    #[serde(default = "default_credential_name")]
    pub credential_name: String,

    /// Transport timeout for a single request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_control_plane_url() -> String {
    "https://api.pinecone.io".into()
}
fn default_api_version() -> String {
    "2025-10".into()
}
fn default_credential_name() -> String {
    CREDENTIAL_NAME.into()
}
fn default_timeout_secs() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            control_plane_url: default_control_plane_url(),
            version: default_api_version(),
            credential_name: default_credential_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.pinecone-assistant/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `PINECONE_API_KEY`
    /// - `PINECONE_ASSISTANT_SOURCE_TAG`
    /// - `PINECONE_ASSISTANT_API_VERSION`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("PINECONE_API_KEY").filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(tag) = lookup("PINECONE_ASSISTANT_SOURCE_TAG").filter(|t| !t.is_empty()) {
            self.source_tag.default_tag = tag;
        }
        if let Some(version) = lookup("PINECONE_ASSISTANT_API_VERSION").filter(|v| !v.is_empty()) {
            self.api.version = version;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".pinecone-assistant")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.version.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.version must not be empty".into(),
            ));
        }

        let url = &self.api.control_plane_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "api.control_plane_url must start with http:// or https:// (got {url})"
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ConfigError::ValidationError(
                    "api_key is not set (config file or PINECONE_API_KEY)".into(),
                )
            })
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            continue_on_fail: false,
            package: PackageConfig::default(),
            source_tag: SourceTagConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

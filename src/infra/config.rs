// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::errors::TaskFlowError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Pin every message to one provider instead of classifying.
    /// Accepted values: "local", "general", "web". Anything else
    /// (or absence) means automatic classification.
    pub default_provider: Option<String>,

    /// Upper bound on a single remote call.
    pub timeout_seconds: u64,

    /// Completion cap passed to remote sources.
    pub max_tokens: u32,

    /// Target language for generated answers ("pt" or "en").
    pub language: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_provider: None,
            timeout_seconds: 30,
            max_tokens: 500,
            language: "pt".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "SourceConfig::general_default")]
    pub general: SourceConfig,

    #[serde(default = "SourceConfig::web_default")]
    pub web: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            general: SourceConfig::general_default(),
            web: SourceConfig::web_default(),
        }
    }
}

/// One remote text-generation endpoint. The API key itself never lives
/// in config or in the core; only the env var name does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
}

impl SourceConfig {
    fn general_default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
        }
    }

    fn web_default() -> Self {
        Self {
            base_url: "https://api.perplexity.ai".into(),
            model: "llama-3.1-sonar-small-128k-online".into(),
            api_key_env: "PERPLEXITY_API_KEY".into(),
        }
    }
}

impl Config {
    /// Load from the default location (~/.taskflow/config.toml),
    /// falling back to defaults when the file does not exist.
    pub fn load() -> Result<Self, TaskFlowError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, TaskFlowError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| TaskFlowError::Config(format!("{}: {e}", path.display())))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".taskflow").join("config.toml"))
}

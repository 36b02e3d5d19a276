// src/assistant/openai.rs — General-purpose remote source (OpenAI chat API)

use async_trait::async_trait;
use std::time::Duration;

use super::{system_prompt, Provider, ResponseSource};
use crate::infra::config::Config;
use crate::infra::errors::TaskFlowError;

pub struct OpenAiSource {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
    system: String,
    max_tokens: u32,
}

impl OpenAiSource {
    /// Build from config, resolving the API key from the configured env
    /// var. The key lives only inside this value; nothing persists it.
    pub fn from_config(config: &Config) -> Result<Self, TaskFlowError> {
        let source = &config.sources.general;
        let api_key =
            std::env::var(&source.api_key_env).map_err(|_| TaskFlowError::MissingCredential {
                source_id: "openai".into(),
                env_var: source.api_key_env.clone(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.assistant.timeout_seconds))
            .build()
            .map_err(|e| TaskFlowError::Config(format!("http client: {e}")))?;

        Ok(Self {
            api_key,
            model: source.model.clone(),
            base_url: source.base_url.clone(),
            client,
            system: system_prompt(&config.assistant.language, false),
            max_tokens: config.assistant.max_tokens,
        })
    }
}

#[async_trait]
impl ResponseSource for OpenAiSource {
    fn id(&self) -> &str {
        "openai"
    }

    fn provider(&self) -> Provider {
        Provider::General
    }

    async fn respond(&self, message: &str) -> Result<String, TaskFlowError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system },
                { "role": "user", "content": message },
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskFlowError::Source {
                source_id: "openai".into(),
                message: e.to_string(),
                retriable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TaskFlowError::Source {
                source_id: "openai".into(),
                message: format!("HTTP {}: {}", status, error_body),
                retriable: status.is_server_error(),
            });
        }

        let resp: serde_json::Value =
            response.json().await.map_err(|e| TaskFlowError::Source {
                source_id: "openai".into(),
                message: format!("Failed to parse response: {}", e),
                retriable: false,
            })?;

        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(TaskFlowError::EmptyCompletion {
                source_id: "openai".into(),
            })?;

        Ok(content.to_string())
    }
}

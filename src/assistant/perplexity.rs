// src/assistant/perplexity.rs — Web-augmented remote source (Perplexity API)

use async_trait::async_trait;
use std::time::Duration;

use super::{system_prompt, Provider, ResponseSource};
use crate::infra::config::Config;
use crate::infra::errors::TaskFlowError;

/// Same chat-completions wire shape as the general source, plus the
/// online-search knobs: low temperature and a one-month recency filter.
pub struct PerplexitySource {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
    system: String,
    max_tokens: u32,
}

impl PerplexitySource {
    pub fn from_config(config: &Config) -> Result<Self, TaskFlowError> {
        let source = &config.sources.web;
        let api_key =
            std::env::var(&source.api_key_env).map_err(|_| TaskFlowError::MissingCredential {
                source_id: "perplexity".into(),
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
            system: system_prompt(&config.assistant.language, true),
            max_tokens: config.assistant.max_tokens,
        })
    }
}

#[async_trait]
impl ResponseSource for PerplexitySource {
    fn id(&self) -> &str {
        "perplexity"
    }

    fn provider(&self) -> Provider {
        Provider::WebSearch
    }

    async fn respond(&self, message: &str) -> Result<String, TaskFlowError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system },
                { "role": "user", "content": message },
            ],
            "temperature": 0.2,
            "top_p": 0.9,
            "max_tokens": self.max_tokens,
            "return_images": false,
            "return_related_questions": false,
            "search_recency_filter": "month",
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskFlowError::Source {
                source_id: "perplexity".into(),
                message: e.to_string(),
                retriable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "perplexity request failed");
            return Err(TaskFlowError::Source {
                source_id: "perplexity".into(),
                message: format!("HTTP {}: {}", status, error_body),
                retriable: status.is_server_error(),
            });
        }

        let resp: serde_json::Value =
            response.json().await.map_err(|e| TaskFlowError::Source {
                source_id: "perplexity".into(),
                message: format!("Failed to parse response: {}", e),
                retriable: false,
            })?;

        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(TaskFlowError::EmptyCompletion {
                source_id: "perplexity".into(),
            })?;

        Ok(content.to_string())
    }
}

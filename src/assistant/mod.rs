// src/assistant/mod.rs — Assistant response layer

pub mod classify;
pub mod local;
pub mod openai;
pub mod perplexity;
pub mod router;
pub mod session;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::TaskFlowError;

/// Where an answer comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Canned keyword table, always available.
    Local,
    /// General-purpose remote model.
    General,
    /// Web-augmented remote model with recency filtering.
    #[serde(rename = "web")]
    WebSearch,
}

impl Provider {
    /// Lenient parse for config/CLI pins. Unknown strings mean
    /// "no pin", not an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "general" | "openai" => Some(Self::General),
            "web" | "perplexity" => Some(Self::WebSearch),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Local => write!(f, "local"),
            Provider::General => write!(f, "general"),
            Provider::WebSearch => write!(f, "web"),
        }
    }
}

/// One response source the router can dispatch to.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    fn id(&self) -> &str;
    fn provider(&self) -> Provider;

    /// Produce an answer for one user message. Remote implementations
    /// make at most one request; retries are not their business.
    async fn respond(&self, message: &str) -> Result<String, TaskFlowError>;
}

/// Fixed system instruction sent with every remote request. The web
/// variant asks for up-to-date information, matching its recency filter.
pub(crate) fn system_prompt(language: &str, web: bool) -> String {
    match (language, web) {
        ("pt", false) => "És um assistente especializado em gestão de tarefas e produtividade. \
                          Responde sempre em português e de forma concisa e útil."
            .into(),
        ("pt", true) => "És um assistente especializado em gestão de tarefas e produtividade. \
                         Responde sempre em português, de forma concisa e com informações atualizadas."
            .into(),
        (lang, false) => format!(
            "You are a task-management productivity assistant. \
             Always respond in {lang}, concisely and helpfully."
        ),
        (lang, true) => format!(
            "You are a task-management productivity assistant. \
             Always respond in {lang}, concisely and with up-to-date information."
        ),
    }
}

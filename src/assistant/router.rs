// src/assistant/router.rs — Response routing with local fallback

use std::sync::Arc;

use super::classify::ClassifierRules;
use super::local::LocalResponder;
use super::openai::OpenAiSource;
use super::perplexity::PerplexitySource;
use super::{Provider, ResponseSource};
use crate::infra::config::Config;
use crate::util;

/// What the router hands back for every message. `warning` carries a
/// non-fatal notice (remote failure, unconfigured source) for the UI
/// to display; it never blocks the answer.
#[derive(Debug, Clone)]
pub struct RouterReply {
    pub text: String,
    pub source_used: Provider,
    pub warning: Option<String>,
}

/// Routes each message to one response source. The local responder is
/// mandatory, so a reply is always produced; the remote sources are
/// optional and any failure there falls back to the local table.
pub struct Router {
    rules: ClassifierRules,
    local: LocalResponder,
    general: Option<Arc<dyn ResponseSource>>,
    web: Option<Arc<dyn ResponseSource>>,
}

impl Router {
    pub fn new(rules: ClassifierRules, local: LocalResponder) -> Self {
        Self {
            rules,
            local,
            general: None,
            web: None,
        }
    }

    pub fn with_general(mut self, source: Arc<dyn ResponseSource>) -> Self {
        self.general = Some(source);
        self
    }

    pub fn with_web(mut self, source: Arc<dyn ResponseSource>) -> Self {
        self.web = Some(source);
        self
    }

    /// Build a router from config, wiring up every remote source whose
    /// credential resolves. A missing key just leaves that source out;
    /// messages classified for it will fall back to local with a notice.
    pub fn from_config(config: &Config) -> Self {
        let mut router = Router::new(ClassifierRules::default(), LocalResponder::default());

        match OpenAiSource::from_config(config) {
            Ok(source) => router = router.with_general(Arc::new(source)),
            Err(e) => tracing::debug!("general source unavailable: {e}"),
        }
        match PerplexitySource::from_config(config) {
            Ok(source) => router = router.with_web(Arc::new(source)),
            Err(e) => tracing::debug!("web source unavailable: {e}"),
        }

        router
    }

    /// Answer one message. Never fails: remote errors are absorbed into
    /// a local fallback reply. At most one remote attempt is made.
    ///
    /// `explicit` pins a provider; `None` means automatic classification.
    pub async fn respond(&self, message: &str, explicit: Option<Provider>) -> RouterReply {
        let provider = explicit.unwrap_or_else(|| self.rules.classify(message));
        tracing::debug!(
            provider = %provider,
            pinned = explicit.is_some(),
            message = util::preview(message, 80),
            "routing message"
        );

        let source = match provider {
            Provider::Local => {
                return RouterReply {
                    text: self.local.lookup(message).to_string(),
                    source_used: Provider::Local,
                    warning: None,
                };
            }
            Provider::General => &self.general,
            Provider::WebSearch => &self.web,
        };

        let Some(source) = source else {
            return self.fallback(message, format!("no {provider} source configured"));
        };

        match source.respond(message).await {
            Ok(text) => RouterReply {
                text,
                source_used: provider,
                warning: None,
            },
            Err(e) => {
                tracing::warn!(source = source.id(), "remote source failed: {e}");
                self.fallback(message, e.to_string())
            }
        }
    }

    fn fallback(&self, message: &str, warning: String) -> RouterReply {
        RouterReply {
            text: self.local.lookup(message).to_string(),
            source_used: Provider::Local,
            warning: Some(warning),
        }
    }
}

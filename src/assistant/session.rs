// src/assistant/session.rs — Chat session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::router::{Router, RouterReply};
use super::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub source_used: Option<Provider>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: Sender, source_used: Option<Provider>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            source_used,
        }
    }
}

const GREETING: &str = "Olá! Sou o seu assistente de tarefas. Como posso ajudar?";

/// One conversation. Messages live only for the session; nothing is
/// persisted. `send` takes `&mut self`, so a session can never have two
/// requests in flight — callers wait for one turn to finish before the
/// next starts.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    /// Optional provider pin applied to every message (explicit mode).
    pin: Option<Provider>,
}

impl ChatSession {
    pub fn new(pin: Option<Provider>) -> Self {
        Self {
            messages: vec![ChatMessage::new(GREETING, Sender::Assistant, Some(Provider::Local))],
            pin,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Run one turn: record the user message, route it, record the
    /// assistant reply. Blank input is ignored and produces no turn.
    pub async fn send(&mut self, router: &Router, text: &str) -> Option<RouterReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages
            .push(ChatMessage::new(text, Sender::User, None));

        let reply = router.respond(text, self.pin).await;
        self.messages.push(ChatMessage::new(
            reply.text.clone(),
            Sender::Assistant,
            Some(reply.source_used),
        ));

        Some(reply)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::classify::ClassifierRules;
    use crate::assistant::local::LocalResponder;

    fn local_only_router() -> Router {
        Router::new(ClassifierRules::default(), LocalResponder::default())
    }

    #[tokio::test]
    async fn test_session_starts_with_greeting() {
        let session = ChatSession::default();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Assistant);
    }

    #[tokio::test]
    async fn test_send_appends_both_sides() {
        let router = local_only_router();
        let mut session = ChatSession::default();

        let reply = session.send(&router, "ajuda").await.unwrap();
        assert_eq!(reply.source_used, Provider::Local);
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert_eq!(session.messages()[2].text, reply.text);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let router = local_only_router();
        let mut session = ChatSession::default();
        assert!(session.send(&router, "   ").await.is_none());
        assert_eq!(session.messages().len(), 1);
    }
}

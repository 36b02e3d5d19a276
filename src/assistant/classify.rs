// src/assistant/classify.rs — Message classification for provider selection

use regex::RegexSet;

use super::Provider;
use crate::infra::errors::TaskFlowError;

/// Classification rules: keyword sets and pattern sets evaluated in a
/// fixed precedence order. One rules value serves every chat surface;
/// deployments that want different vocabularies construct their own
/// instead of forking the router.
#[derive(Debug)]
pub struct ClassifierRules {
    web_keywords: Vec<String>,
    task_keywords: Vec<String>,
    web_patterns: RegexSet,
    complex_patterns: RegexSet,
    long_message_threshold: usize,
}

/// Time-sensitive topics that only a web-augmented model answers well.
const WEB_KEYWORDS: &[&str] = &[
    "tempo hoje",
    "weather",
    "clima",
    "preço",
    "price of",
    "cotação",
    "notícia",
    "news",
    "quem é",
    "who is",
    "quando foi",
    "when did",
    "onde fica",
    "where is",
];

/// Vocabulary the canned table already covers: app help, greetings,
/// courtesies.
const TASK_KEYWORDS: &[&str] = &[
    "organizar",
    "organize",
    "filtro",
    "filter",
    "adicionar",
    "add a task",
    "add task",
    "tarefa",
    "editar",
    "edit",
    "eliminar",
    "delete",
    "ajuda",
    "help",
    "olá",
    "hello",
    "obrigado",
    "thanks",
    "taskflow",
    "produtividade",
    "productivity",
];

const WEB_PATTERNS: &[&str] = &[
    r"what('s| is) the (price|cost|weather|temperature|score)",
    r"\bwhat happened\b",
    r"\bwho (won|is|was)\b",
    r"qual (é|e) o (preço|resultado)",
    r"\bquanto custa\b",
    r"como está o tempo",
];

const COMPLEX_PATTERNS: &[&str] = &[
    r"\b(explain|explica|explique)\b",
    r"\bcompar(e|a|ação)",
    r"pros and cons",
    r"prós e contras",
    r"\b(write|escreve|escreva)\b",
    r"\b(translate|traduz)",
    r"\b(summari[sz]e|resum)",
    r"\b(analy[sz]e|analis)",
    r"\b(strategy|estratégia|plano?)\b",
];

const LONG_MESSAGE_THRESHOLD: usize = 100;

impl ClassifierRules {
    pub fn new(
        web_keywords: &[&str],
        task_keywords: &[&str],
        web_patterns: &[&str],
        complex_patterns: &[&str],
        long_message_threshold: usize,
    ) -> Result<Self, TaskFlowError> {
        let compile = |patterns: &[&str]| {
            RegexSet::new(patterns)
                .map_err(|e| TaskFlowError::Config(format!("bad classifier pattern: {e}")))
        };
        Ok(Self {
            web_keywords: web_keywords.iter().map(|k| k.to_lowercase()).collect(),
            task_keywords: task_keywords.iter().map(|k| k.to_lowercase()).collect(),
            web_patterns: compile(web_patterns)?,
            complex_patterns: compile(complex_patterns)?,
            long_message_threshold,
        })
    }

    /// Decide which provider should answer `message`. First match wins:
    ///
    /// 1. freshness/web vocabulary or a web-query pattern → `WebSearch`
    /// 2. task-domain vocabulary → `Local`
    /// 3. complex-reasoning pattern, or a long message → `General`
    /// 4. anything else → `Local`
    ///
    /// Ambiguity is not an error; everything falls through to `Local`.
    pub fn classify(&self, message: &str) -> Provider {
        let text = message.trim().to_lowercase();
        if text.is_empty() {
            return Provider::Local;
        }

        if self.web_keywords.iter().any(|k| text.contains(k.as_str()))
            || self.web_patterns.is_match(&text)
        {
            return Provider::WebSearch;
        }

        if self.task_keywords.iter().any(|k| text.contains(k.as_str())) {
            return Provider::Local;
        }

        if self.complex_patterns.is_match(&text)
            || text.chars().count() > self.long_message_threshold
        {
            return Provider::General;
        }

        Provider::Local
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::new(
            WEB_KEYWORDS,
            TASK_KEYWORDS,
            WEB_PATTERNS,
            COMPLEX_PATTERNS,
            LONG_MESSAGE_THRESHOLD,
        )
        .expect("built-in classifier patterns compile")
    }
}

// src/assistant/local.rs — Canned keyword-table responder

use async_trait::async_trait;

use super::{Provider, ResponseSource};
use crate::infra::errors::TaskFlowError;

/// The always-available response source: an ordered keyword → response
/// table. Lookup is case-insensitive substring containment and the
/// first matching entry wins, so table order is part of the contract.
pub struct LocalResponder {
    table: Vec<(String, String)>,
    fallback: String,
}

const DEFAULT_TABLE: &[(&str, &str)] = &[
    (
        "organizar",
        "Recomendo organizar as suas tarefas por prioridade! Use as etiquetas \"Alta\", \
         \"Média\" e \"Baixa\" e defina datas limite para as mais importantes.",
    ),
    (
        "filtro",
        "Pode filtrar as suas tarefas por: \"Todas\", \"Por Fazer\" ou \"Concluídas\". \
         Use também a ordenação por data, prioridade ou título.",
    ),
    (
        "adicionar",
        "Para adicionar uma nova tarefa, clique no botão \"Nova Tarefa\" e preencha o \
         título (obrigatório), descrição, prioridade e categoria.",
    ),
    (
        "editar",
        "Para editar uma tarefa, clique no ícone do lápis na tarefa que pretende modificar.",
    ),
    (
        "eliminar",
        "Para eliminar uma tarefa, clique no ícone do lixo e confirme a ação.",
    ),
    (
        "produtividade",
        "Dicas de produtividade: 1) Defina prioridades claras, 2) Use a técnica Pomodoro, \
         3) Organize tarefas por categoria, 4) Defina datas limite realistas.",
    ),
    (
        "ajuda",
        "Posso ajudar com: organização de tarefas, uso de filtros, adição/edição/eliminação \
         de tarefas, e dicas de produtividade!",
    ),
    ("olá", "Olá! Como posso ajudá-lo hoje?"),
    ("obrigado", "De nada! Estou aqui para ajudar sempre que precisar."),
];

const DEFAULT_FALLBACK: &str =
    "Desculpe, não entendi a sua pergunta. Pode perguntar sobre: organização de tarefas, \
     filtros, como adicionar/editar/eliminar tarefas, ou pedir ajuda geral.";

impl LocalResponder {
    pub fn new(table: Vec<(String, String)>, fallback: impl Into<String>) -> Self {
        Self {
            table,
            fallback: fallback.into(),
        }
    }

    /// Synchronous lookup; this is what the router's fallback path uses.
    pub fn lookup(&self, message: &str) -> &str {
        let text = message.to_lowercase();
        self.table
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, response)| response.as_str())
            .unwrap_or(&self.fallback)
    }
}

impl Default for LocalResponder {
    fn default() -> Self {
        Self::new(
            DEFAULT_TABLE
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            DEFAULT_FALLBACK,
        )
    }
}

#[async_trait]
impl ResponseSource for LocalResponder {
    fn id(&self) -> &str {
        "local"
    }

    fn provider(&self) -> Provider {
        Provider::Local
    }

    async fn respond(&self, message: &str) -> Result<String, TaskFlowError> {
        Ok(self.lookup(message).to_string())
    }
}

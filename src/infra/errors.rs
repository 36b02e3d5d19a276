// src/infra/errors.rs — Error types for TaskFlow

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskFlowError {
    // Response source errors (recoverable via local fallback)
    #[error("Source '{source_id}' error: {message}")]
    Source {
        source_id: String,
        message: String,
        retriable: bool,
    },

    #[error("No API key for '{source_id}'. Set {env_var}.")]
    MissingCredential { source_id: String, env_var: String },

    #[error("Source '{source_id}' returned no generated text")]
    EmptyCompletion { source_id: String },

    // Store errors
    #[error("Task '{id}' not found")]
    TaskNotFound { id: String },

    #[error("Invalid task: {0}")]
    Validation(String),

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskFlowError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            TaskFlowError::Source {
                retriable: true,
                ..
            }
        )
    }
}

// src/task/store.rs — Task store boundary and in-memory implementation

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{watch, RwLock};

use super::{Status, Task, TaskDraft, TaskPatch};
use crate::infra::errors::TaskFlowError;

/// The external persistence collaborator. A store is scoped to one
/// authenticated owner: every snapshot it pushes contains only that
/// owner's tasks, so the query engine never has to think about owners.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Live subscription. The receiver always holds the latest full
    /// snapshot; create/update/delete show up as replacement snapshots.
    fn subscribe(&self) -> watch::Receiver<Vec<Task>>;

    async fn create(&self, draft: TaskDraft) -> Result<Task, TaskFlowError>;

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, TaskFlowError>;

    async fn delete(&self, id: &str) -> Result<(), TaskFlowError>;

    /// Completion toggle. Status is the single source of truth for
    /// "done", so this is the only mutation the toggle needs.
    async fn set_status(&self, id: &str, status: Status) -> Result<Task, TaskFlowError>;
}

/// In-memory store used by the CLI and tests. Production deployments
/// put a real document database behind [`TaskStore`] instead.
pub struct MemoryStore {
    owner_id: String,
    tasks: RwLock<Vec<Task>>,
    tx: watch::Sender<Vec<Task>>,
}

impl MemoryStore {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            owner_id: owner_id.into(),
            tasks: RwLock::new(Vec::new()),
            tx,
        }
    }

    fn publish(&self, snapshot: Vec<Task>) {
        // send_replace keeps working even with no live receivers
        self.tx.send_replace(snapshot);
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tx.subscribe()
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task, TaskFlowError> {
        draft.validate()?;
        let now = Utc::now();
        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            status: Status::Pending,
            created_at: now,
            updated_at: now,
            owner_id: self.owner_id.clone(),
        };

        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        self.publish(tasks.clone());

        tracing::debug!(task_id = %task.id, "task created");
        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, TaskFlowError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(TaskFlowError::Validation("title must not be empty".into()));
            }
        }

        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskFlowError::TaskNotFound { id: id.into() })?;

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(category) = patch.category {
            task.category = Some(category);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        let updated = task.clone();
        self.publish(tasks.clone());
        tracing::debug!(task_id = %id, "task updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), TaskFlowError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TaskFlowError::TaskNotFound { id: id.into() });
        }
        self.publish(tasks.clone());
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn set_status(&self, id: &str, status: Status) -> Result<Task, TaskFlowError> {
        self.update(
            id,
            TaskPatch {
                status: Some(status),
                ..TaskPatch::default()
            },
        )
        .await
    }
}

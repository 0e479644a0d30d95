use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskFilter, UpdateTask};

/// Repository trait for Task persistence.
///
/// Every operation is scoped to an owning user: a task belonging to someone
/// else behaves exactly like a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    async fn create(&self, task: Task) -> TaskResult<Task>;

    /// Get one of the user's tasks by ID
    async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> TaskResult<Option<Task>>;

    /// List the user's tasks with optional filters
    async fn list(&self, user_id: Uuid, filter: TaskFilter) -> TaskResult<Vec<Task>>;

    /// Update one of the user's tasks
    async fn update(&self, user_id: Uuid, id: Uuid, input: UpdateTask) -> TaskResult<Task>;

    /// Delete one of the user's tasks by ID
    async fn delete(&self, user_id: Uuid, id: Uuid) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = %task.id, user_id = %task.user_id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .get(&id)
            .filter(|task| task.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: Uuid, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        let mut result: Vec<Task> = tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .filter(|task| {
                filter
                    .completed
                    .is_none_or(|completed| task.completed == completed)
            })
            .cloned()
            .collect();

        // Sort by created_at descending (newest first)
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Apply pagination
        let result: Vec<Task> = result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(result)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        let task = tasks
            .get_mut(&id)
            .filter(|task| task.user_id == user_id)
            .ok_or(TaskError::NotFound(id))?;

        task.apply_update(input);

        tracing::info!(task_id = %id, "Updated task");
        Ok(task.clone())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        let owned = tasks.get(&id).is_some_and(|task| task.user_id == user_id);
        if !owned {
            return Ok(false);
        }

        tasks.remove(&id);
        tracing::info!(task_id = %id, "Deleted task");
        Ok(true)
    }
}

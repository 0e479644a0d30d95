use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::repository::TaskRepository;

/// Hard cap on page size regardless of what the client asks for
const MAX_PAGE_SIZE: usize = 100;

/// Service layer for Task business logic.
///
/// Every method acts on behalf of an authenticated user; ownership checks
/// live in the repository queries.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task owned by the user
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn create_task(&self, user_id: Uuid, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(user_id, input);
        self.repository.create(task).await
    }

    /// Get one of the user's tasks by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, user_id: Uuid, id: Uuid) -> TaskResult<Task> {
        self.repository
            .get_by_id(user_id, id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List the user's tasks with filters
    #[instrument(skip(self, filter), fields(user_id = %user_id))]
    pub async fn list_tasks(&self, user_id: Uuid, mut filter: TaskFilter) -> TaskResult<Vec<Task>> {
        filter.limit = filter.limit.min(MAX_PAGE_SIZE);
        self.repository.list(user_id, filter).await
    }

    /// Update one of the user's tasks
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, user_id: Uuid, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        self.repository.update(user_id, id, input).await
    }

    /// Delete one of the user's tasks, returning the deleted record
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, user_id: Uuid, id: Uuid) -> TaskResult<Task> {
        let task = self
            .repository
            .get_by_id(user_id, id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let deleted = self.repository.delete(user_id, id).await?;
        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(task)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Task entity - matches SQL schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Completion flag
    pub completed: bool,
    /// Owning user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// DTO for updating an existing task
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Query filters for listing tasks
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct TaskFilter {
    /// Only tasks with this completion state
    pub completed: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            completed: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> usize {
    50
}

impl Task {
    /// Create a new task owned by the given user
    pub fn new(user_id: Uuid, input: CreateTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            completed: input.completed,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, refreshing `updated_at`
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn new_task_gets_v7_id_and_owner() {
        let owner = Uuid::now_v7();
        let task = Task::new(owner, create_input("Write tests"));

        assert_eq!(task.id.get_version_num(), 7);
        assert_eq!(task.user_id, owner);
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn apply_update_only_touches_provided_fields() {
        let mut task = Task::new(Uuid::now_v7(), create_input("Original"));

        task.apply_update(UpdateTask {
            completed: Some(true),
            ..Default::default()
        });

        assert_eq!(task.title, "Original");
        assert!(task.completed);
        assert!(task.updated_at >= task.created_at);
    }

    #[test]
    fn create_task_rejects_empty_title() {
        let input = create_input("");
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_task_defaults_completed_to_false() {
        let input: CreateTask = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert!(!input.completed);
    }

    #[test]
    fn task_filter_defaults() {
        let filter: TaskFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.limit, 50);
        assert_eq!(filter.offset, 0);
        assert!(filter.completed.is_none());
    }
}

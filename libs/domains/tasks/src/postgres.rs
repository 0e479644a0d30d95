use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{Task, TaskFilter, UpdateTask},
    repository::TaskRepository,
};

/// PostgreSQL implementation of TaskRepository backed by Sea-ORM
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find one of the user's tasks; ownership is part of the query
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> TaskResult<Option<entity::Model>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(model)
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: Task) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = task.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = %model.id, user_id = %model.user_id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> TaskResult<Option<Task>> {
        let model = self.find_owned(user_id, id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, user_id: Uuid, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let mut query = entity::Entity::find().filter(entity::Column::UserId.eq(user_id));

        if let Some(completed) = filter.completed {
            query = query.filter(entity::Column::Completed.eq(completed));
        }

        // Apply pagination and ordering
        query = query
            .order_by_desc(entity::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, user_id: Uuid, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        // Fetch scoped to the owner; a foreign task reads as missing
        let model = self
            .find_owned(user_id, id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let mut task: Task = model.into();
        task.apply_update(input);

        let active_model: entity::ActiveModel = task.into();
        let updated = active_model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => TaskError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(task_id = %id, "Updated task");
        Ok(updated.into())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> TaskResult<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

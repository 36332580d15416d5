use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::dao::{NewTask, TaskChanges, TaskDao},
    db::entities::task,
    error::AppError,
};

#[derive(Clone)]
pub struct TaskService {
    task_dao: TaskDao,
}

impl TaskService {
    pub fn new(task_dao: TaskDao) -> Self {
        Self { task_dao }
    }

    /// Creates a task at the end of its list. An unknown `list_id` surfaces
    /// as the store's foreign-key violation.
    pub async fn create_task(&self, new_task: NewTask) -> Result<task::Model, AppError> {
        let task = self.task_dao.create_task(new_task).await?;
        info!(
            task_id = %task.task_id,
            list_id = %task.list_id,
            position = task.position,
            "created task"
        );
        Ok(task)
    }

    pub async fn update_task(
        &self,
        task_id: &Uuid,
        changes: TaskChanges,
        actor: Uuid,
    ) -> Result<task::Model, AppError> {
        Ok(self.task_dao.update_task(task_id, changes, actor).await?)
    }

    /// Moves a task and returns how many rows were rewritten. `0` means the
    /// task is unknown or already in place.
    pub async fn move_task(
        &self,
        task_id: &Uuid,
        position: i32,
        actor: Uuid,
    ) -> Result<u64, AppError> {
        let affected = self.task_dao.move_task(task_id, position, actor).await?;
        if affected == 0 {
            debug!(task_id = %task_id, position, "move was a no-op");
        } else {
            info!(task_id = %task_id, position, affected, "moved task");
        }
        Ok(affected)
    }

    /// `true` when a row was removed. Remaining positions are not compacted.
    pub async fn delete_task(&self, task_id: &Uuid) -> Result<bool, AppError> {
        let deleted = self.task_dao.delete_task(task_id).await?;
        debug!(task_id = %task_id, deleted, "delete task");
        Ok(deleted)
    }

    pub async fn list_tasks(&self, list_id: Option<&Uuid>) -> Result<Vec<task::Model>, AppError> {
        Ok(self.task_dao.list_tasks(list_id).await?)
    }
}

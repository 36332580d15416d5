use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement, Value,
};
use tracing::debug;
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::Task;
use crate::db::entities::task;
use crate::positions::{self, MovePlan};

#[derive(Clone)]
pub struct TaskDao {
    db: DatabaseConnection,
}

impl DaoBase for TaskDao {
    type Entity = Task;
    const NAME: &'static str = "Task";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_user_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TaskDao {
    /// The task holding the highest position in `list_id`, if any.
    pub async fn last_in_list(&self, list_id: &Uuid) -> DaoResult<Option<task::Model>> {
        Ok(Task::find()
            .filter(task::Column::ListId.eq(*list_id))
            .order_by_desc(task::Column::Position)
            .one(&self.db)
            .await?)
    }

    pub async fn max_position(&self, list_id: &Uuid) -> DaoResult<Option<i32>> {
        Ok(self.last_in_list(list_id).await?.map(|task| task.position))
    }

    /// Appends a task to the end of its list.
    ///
    /// The maximum is read before the insert without a list-wide lock, so two
    /// concurrent creates in one list can end up sharing a position.
    pub async fn create_task(&self, new_task: NewTask) -> DaoResult<task::Model> {
        let position = positions::next_position(self.max_position(&new_task.list_id).await?);
        let model = task::ActiveModel {
            list_id: Set(new_task.list_id),
            title: Set(new_task.title),
            description: Set(new_task.description),
            position: Set(position),
            completed: Set(false),
            ..Default::default()
        };
        self.create(model, new_task.created_user_id).await
    }

    /// Updates title and completion. Position is never touched here.
    pub async fn update_task(
        &self,
        task_id: &Uuid,
        changes: TaskChanges,
        actor: Uuid,
    ) -> DaoResult<task::Model> {
        let TaskChanges { title, completed } = changes;
        self.update(*task_id, actor, move |active| {
            if let Some(title) = title {
                active.title = Set(title);
            }
            if let Some(completed) = completed {
                active.completed = Set(completed);
            }
        })
        .await
    }

    pub async fn delete_task(&self, task_id: &Uuid) -> DaoResult<bool> {
        self.delete(*task_id).await
    }

    /// Moves a task to `new_position` and returns the number of rows written.
    ///
    /// Returns `0` without touching storage when the task does not exist or
    /// already sits at `new_position`. Otherwise the moved task and every task
    /// between the old and new slot are rewritten by one statement.
    pub async fn move_task(
        &self,
        task_id: &Uuid,
        new_position: i32,
        actor: Uuid,
    ) -> DaoResult<u64> {
        let Some(task) = self.try_find_by_id(*task_id).await? else {
            return Ok(0);
        };
        let Some(plan) = MovePlan::new(task.position, new_position) else {
            return Ok(0);
        };

        let max_position = self.max_position(&task.list_id).await?;
        if !positions::target_in_range(new_position, max_position) {
            return Err(DaoLayerError::InvalidPosition {
                position: new_position,
                max: max_position.unwrap_or(0),
            });
        }

        debug!(
            task_id = %task_id,
            from = plan.from(),
            to = plan.to(),
            direction = plan.direction().as_str(),
            shifted = ?plan.shifted_range(),
            span = plan.span(),
            "moving task"
        );
        let statement = move_statement(
            self.db.get_database_backend(),
            &task.list_id,
            task_id,
            plan,
            actor,
            Utc::now().fixed_offset(),
        );
        let result = self.db.execute_raw(statement).await?;
        Ok(result.rows_affected())
    }

    /// Tasks of one list, or of every list when `list_id` is `None`, in
    /// presentation order.
    pub async fn list_tasks(&self, list_id: Option<&Uuid>) -> DaoResult<Vec<task::Model>> {
        let mut query = Task::find();
        if let Some(list_id) = list_id {
            query = query.filter(task::Column::ListId.eq(*list_id));
        }
        Ok(query
            .order_by_desc(task::Column::Position)
            .order_by_desc(task::Column::UpdatedAt)
            .order_by_desc(task::Column::Title)
            .all(&self.db)
            .await?)
    }
}

/// Renders the range-shift update for `plan`.
///
/// The derived relation `moved` maps each affected task id to its new
/// position (the moved task to the target, the tasks in
/// [`MovePlan::shifted_range`] one slot toward the vacated position) and is
/// joined back onto `tasks`, so the whole permutation is applied against one
/// snapshot.
pub(crate) fn move_statement(
    backend: DatabaseBackend,
    list_id: &Uuid,
    task_id: &Uuid,
    plan: MovePlan,
    actor: Uuid,
    now: DateTime<FixedOffset>,
) -> Statement {
    let p = |index: usize| match backend {
        DatabaseBackend::Postgres => format!("${index}"),
        _ => format!("?{index}"),
    };
    let shift = plan.shift();
    let shifted = plan.shifted_range();

    let sql = format!(
        r#"UPDATE "tasks" AS "current" SET "position" = "moved"."new_position", "updated_at" = {updated_at}, "updated_user_id" = {updated_user_id} FROM (SELECT "task_id", CAST({target} AS INTEGER) AS "new_position" FROM "tasks" WHERE "task_id" = {task_id} UNION ALL SELECT "task_id", "position" + ({shift}) AS "new_position" FROM "tasks" WHERE "list_id" = {list_id} AND "task_id" <> {task_id} AND "position" BETWEEN {low} AND {high}) AS "moved" WHERE "current"."task_id" = "moved"."task_id""#,
        list_id = p(1),
        task_id = p(2),
        target = p(3),
        low = p(4),
        high = p(5),
        updated_user_id = p(6),
        updated_at = p(7),
    );

    let values: [Value; 7] = [
        (*list_id).into(),
        (*task_id).into(),
        plan.to().into(),
        (*shifted.start()).into(),
        (*shifted.end()).into(),
        actor.into(),
        now.into(),
    ];
    Statement::from_sql_and_values(backend, sql, values)
}

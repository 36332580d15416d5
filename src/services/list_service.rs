use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::dao::{ListDao, TaskDao},
    db::entities::{list, task},
    error::AppError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWithTasks {
    pub list: list::Model,
    pub tasks: Vec<task::Model>,
}

#[derive(Clone)]
pub struct ListService {
    list_dao: ListDao,
    task_dao: TaskDao,
}

impl ListService {
    pub fn new(list_dao: ListDao, task_dao: TaskDao) -> Self {
        Self { list_dao, task_dao }
    }

    pub async fn create_list(&self, title: &str, actor: Uuid) -> Result<ListWithTasks, AppError> {
        let list = self.list_dao.create_list(title, actor).await?;
        info!(list_id = %list.list_id, "created list");
        Ok(ListWithTasks {
            list,
            tasks: Vec::new(),
        })
    }

    /// Every list by title, each with its tasks in presentation order.
    ///
    /// Tasks are read in a single query and bucketed by list rather than
    /// queried once per list.
    pub async fn list_lists(&self) -> Result<Vec<ListWithTasks>, AppError> {
        let lists = self.list_dao.list_lists().await?;
        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let mut tasks_by_list = group_by_list(self.task_dao.list_tasks(None).await?);
        debug!(lists = lists.len(), "attaching tasks to lists");
        Ok(lists
            .into_iter()
            .map(|list| {
                let tasks = tasks_by_list.remove(&list.list_id).unwrap_or_default();
                ListWithTasks { list, tasks }
            })
            .collect())
    }

    pub async fn get_list(&self, list_id: &Uuid) -> Result<Option<ListWithTasks>, AppError> {
        let Some(list) = self.list_dao.find_list(list_id).await? else {
            return Ok(None);
        };
        let tasks = self.task_dao.list_tasks(Some(list_id)).await?;
        Ok(Some(ListWithTasks { list, tasks }))
    }

    pub async fn update_list(
        &self,
        list_id: &Uuid,
        title: Option<String>,
        actor: Uuid,
    ) -> Result<list::Model, AppError> {
        Ok(self.list_dao.update_list(list_id, title, actor).await?)
    }

    /// `true` when the list row was removed.
    pub async fn delete_list(&self, list_id: &Uuid) -> Result<bool, AppError> {
        let deletion = self.list_dao.delete_list(list_id).await?;
        if deletion.list_removed {
            info!(
                list_id = %list_id,
                tasks_removed = deletion.tasks_removed,
                "deleted list"
            );
        } else {
            debug!(list_id = %list_id, "delete skipped, list not found");
        }
        Ok(deletion.list_removed)
    }

    /// Wipes every list and task. Returns `(lists, tasks)` removed.
    pub async fn delete_all(&self) -> Result<(u64, u64), AppError> {
        let (lists, tasks) = self.list_dao.delete_all().await?;
        info!(lists, tasks, "deleted all lists");
        Ok((lists, tasks))
    }
}

/// Buckets tasks by owning list, keeping their relative order.
pub fn group_by_list(tasks: Vec<task::Model>) -> HashMap<Uuid, Vec<task::Model>> {
    let mut grouped: HashMap<Uuid, Vec<task::Model>> = HashMap::new();
    for task in tasks {
        grouped.entry(task.list_id).or_default().push(task);
    }
    grouped
}

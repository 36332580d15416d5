use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{List, Task};
use crate::db::entities::{list, task};

#[derive(Clone)]
pub struct ListDao {
    db: DatabaseConnection,
}

impl DaoBase for ListDao {
    type Entity = List;
    const NAME: &'static str = "List";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Outcome of a cascading list delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDeletion {
    pub list_removed: bool,
    pub tasks_removed: u64,
}

impl ListDao {
    pub async fn create_list(&self, title: &str, actor: Uuid) -> DaoResult<list::Model> {
        let model = list::ActiveModel {
            title: Set(title.to_string()),
            ..Default::default()
        };
        self.create(model, actor).await
    }

    pub async fn list_lists(&self) -> DaoResult<Vec<list::Model>> {
        Ok(List::find()
            .order_by_asc(list::Column::Title)
            .all(&self.db)
            .await?)
    }

    pub async fn find_list(&self, list_id: &Uuid) -> DaoResult<Option<list::Model>> {
        self.try_find_by_id(*list_id).await
    }

    pub async fn update_list(
        &self,
        list_id: &Uuid,
        title: Option<String>,
        actor: Uuid,
    ) -> DaoResult<list::Model> {
        self.update(*list_id, actor, move |active| {
            if let Some(title) = title {
                active.title = Set(title);
            }
        })
        .await
    }

    /// Deletes a list together with all of its tasks. Either both go or
    /// neither does; a missing list rolls the task delete back.
    pub async fn delete_list(&self, list_id: &Uuid) -> DaoResult<ListDeletion> {
        let txn = self.db.begin().await?;
        let result = delete_list_in(&txn, list_id).await;
        let deletion = match result {
            Ok(deletion) if deletion.list_removed => {
                txn.commit().await?;
                deletion
            }
            Ok(_) => {
                txn.rollback().await?;
                ListDeletion {
                    list_removed: false,
                    tasks_removed: 0,
                }
            }
            Err(err) => {
                txn.rollback().await?;
                return Err(err.into());
            }
        };
        Ok(deletion)
    }

    /// Removes every task and list. Used by the seeding binary.
    pub async fn delete_all(&self) -> DaoResult<(u64, u64)> {
        let txn = self.db.begin().await?;
        let tasks = Task::delete_many().exec(&txn).await?.rows_affected;
        let lists = List::delete_many().exec(&txn).await?.rows_affected;
        txn.commit().await?;
        Ok((lists, tasks))
    }
}

async fn delete_list_in(txn: &DatabaseTransaction, list_id: &Uuid) -> Result<ListDeletion, DbErr> {
    let tasks = Task::delete_many()
        .filter(task::Column::ListId.eq(*list_id))
        .exec(txn)
        .await?;
    let list = List::delete_by_id(*list_id).exec(txn).await?;
    Ok(ListDeletion {
        list_removed: list.rows_affected > 0,
        tasks_removed: tasks.rows_affected,
    })
}

use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{list_service::ListService, task_service::TaskService},
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn list(&self) -> ListService {
        ListService::new(self.daos.list(), self.daos.task())
    }

    pub fn task(&self) -> TaskService {
        TaskService::new(self.daos.task())
    }
}

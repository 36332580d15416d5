use sea_orm::DatabaseConnection;

use super::{DaoBase, ListDao, TaskDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn list(&self) -> ListDao {
        DaoBase::new(&self.db)
    }

    pub fn task(&self) -> TaskDao {
        DaoBase::new(&self.db)
    }
}

pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod list_dao;
pub mod task_dao;

pub use base::DaoBase;
pub use base_traits::{AuditedActiveModel, HasIdActiveModel, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use list_dao::{ListDao, ListDeletion};
pub use task_dao::{NewTask, TaskChanges, TaskDao};

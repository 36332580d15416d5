use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Invalid position {position}: expected a value between 1 and {max}")]
    InvalidPosition { position: i32, max: i32 },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

use super::providers;

/// Range predicates of the move statement filter on `list_id` and `position`.
const TASK_POSITION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_list_id_position ON tasks (list_id, position)";

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let provider = providers::provider_for_url(&cfg.url)?;
    info!(provider = provider.name(), "connecting to database");

    let db = provider.connect(cfg).await?;
    sync_schema(&db).await?;
    Ok(db)
}

pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry("tasklist_server::db::entities::*")
        .sync(db)
        .await?;
    db.execute_unprepared(TASK_POSITION_INDEX).await?;
    Ok(())
}

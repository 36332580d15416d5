use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared by every handler. The connection is a pool; cloning it is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { config, db })
    }
}

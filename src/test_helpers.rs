use std::sync::Arc;

use axum::{Router, middleware};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::AppConfig,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

/// Full application router over `db`, wrapped in the same error layers the
/// server binary installs.
pub fn test_app(db: DatabaseConnection) -> Router {
    let state = AppState::new(AppConfig::default(), db);
    router(Arc::clone(&state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}

/// Router over an empty mock database, for requests that never reach storage.
pub fn test_router() -> Router {
    test_app(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{lists, public, tasks};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(lists::router(state.clone()))
        .merge(tasks::router(state))
}

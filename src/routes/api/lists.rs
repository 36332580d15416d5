use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::entities::list,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    services::{ListService, ListWithTasks, ServiceContext},
    state::AppState,
};

use super::tasks::TaskResponse;

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
    pub created_user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub title: Option<String>,
    pub updated_user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub list_id: Uuid,
    pub title: String,
    pub created_user_id: Uuid,
    pub updated_user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskResponse>>,
}

#[derive(Debug, Serialize)]
pub struct MutationResult {
    pub success: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{list_id}",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .with_state(state)
}

async fn list_lists(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ListResponse>> {
    let service = list_service_from_state(state.as_ref());
    let lists = service.list_lists().await?;
    JsonApiResponse::ok(lists.into_iter().map(ListResponse::from).collect())
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateListRequest>,
) -> ApiResult<ListResponse> {
    let title = normalize_title(&body.title)?;
    let service = list_service_from_state(state.as_ref());
    let list = service.create_list(title, body.created_user_id).await?;
    JsonApiResponse::created(list.into())
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
) -> ApiResult<ListResponse> {
    let service = list_service_from_state(state.as_ref());
    let list = service
        .get_list(&list_id)
        .await?
        .ok_or_else(|| AppError::not_found("List not found"))?;
    JsonApiResponse::ok(list.into())
}

async fn update_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
    Json(body): Json<UpdateListRequest>,
) -> ApiResult<ListResponse> {
    let title = match body.title {
        Some(value) => Some(normalize_title(&value)?.to_string()),
        None => None,
    };
    let service = list_service_from_state(state.as_ref());
    let list = service
        .update_list(&list_id, title, body.updated_user_id)
        .await?;
    JsonApiResponse::ok(list.into())
}

async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
) -> ApiResult<MutationResult> {
    let service = list_service_from_state(state.as_ref());
    let success = service.delete_list(&list_id).await?;
    JsonApiResponse::ok(MutationResult { success })
}

pub(super) fn normalize_title(title: &str) -> Result<&str, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Title required"));
    }
    Ok(trimmed)
}

impl From<list::Model> for ListResponse {
    fn from(model: list::Model) -> Self {
        Self {
            list_id: model.list_id,
            title: model.title,
            created_user_id: model.created_user_id,
            updated_user_id: model.updated_user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            tasks: None,
        }
    }
}

impl From<ListWithTasks> for ListResponse {
    fn from(value: ListWithTasks) -> Self {
        let tasks = value.tasks.into_iter().map(TaskResponse::from).collect();
        Self {
            tasks: Some(tasks),
            ..Self::from(value.list)
        }
    }
}

fn list_service_from_state(state: &AppState) -> ListService {
    ServiceContext::from_state(state).list()
}

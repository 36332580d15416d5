use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::dao::{NewTask, TaskChanges},
    db::entities::task,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, TaskService},
    state::AppState,
};

use super::lists::{MutationResult, normalize_title};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub updated_user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub position: i32,
    pub updated_user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task_id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub completed: bool,
    pub created_user_id: Uuid,
    pub updated_user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct MoveTaskResponse {
    pub affected: u64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .route("/tasks/{task_id}", patch(update_task).delete(delete_task))
        .route("/tasks/{task_id}/move", post(move_task))
        .route("/lists/{list_id}/tasks", get(list_tasks_in_list))
        .with_state(state)
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let title = normalize_title(&body.title)?.to_string();
    let description = body
        .description
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let service = task_service_from_state(state.as_ref());
    let task = service
        .create_task(NewTask {
            list_id: body.list_id,
            title,
            description,
            created_user_id: body.created_user_id,
        })
        .await?;
    JsonApiResponse::created(task.into())
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TaskResponse>> {
    let service = task_service_from_state(state.as_ref());
    let tasks = service.list_tasks(None).await?;
    JsonApiResponse::ok(tasks.into_iter().map(TaskResponse::from).collect())
}

async fn list_tasks_in_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Vec<TaskResponse>> {
    let service = task_service_from_state(state.as_ref());
    let tasks = service.list_tasks(Some(&list_id)).await?;
    JsonApiResponse::ok(tasks.into_iter().map(TaskResponse::from).collect())
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let UpdateTaskRequest {
        title,
        completed,
        updated_user_id,
    } = body;
    let title = match title {
        Some(value) => Some(normalize_title(&value)?.to_string()),
        None => None,
    };
    if title.is_none() && completed.is_none() {
        return Err(AppError::bad_request("Title or completed required"));
    }
    let service = task_service_from_state(state.as_ref());
    let task = service
        .update_task(&task_id, TaskChanges { title, completed }, updated_user_id)
        .await?;
    JsonApiResponse::ok(task.into())
}

async fn move_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<MoveTaskRequest>,
) -> ApiResult<MoveTaskResponse> {
    let service = task_service_from_state(state.as_ref());
    let affected = service
        .move_task(&task_id, body.position, body.updated_user_id)
        .await?;
    JsonApiResponse::ok(MoveTaskResponse { affected })
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<MutationResult> {
    let service = task_service_from_state(state.as_ref());
    let success = service.delete_task(&task_id).await?;
    JsonApiResponse::ok(MutationResult { success })
}

impl From<task::Model> for TaskResponse {
    fn from(model: task::Model) -> Self {
        Self {
            task_id: model.task_id,
            list_id: model.list_id,
            title: model.title,
            description: model.description,
            position: model.position,
            completed: model.completed,
            created_user_id: model.created_user_id,
            updated_user_id: model.updated_user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn task_service_from_state(state: &AppState) -> TaskService {
    ServiceContext::from_state(state).task()
}

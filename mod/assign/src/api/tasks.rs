use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Extension, Json, Router};

use taskboard_core::ServiceError;

use crate::api::AppState;
use crate::model::{CreateTask, Role, Task, TaskUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{task_id}", put(update_task).delete(delete_task))
        .route("/tasks/assigned/{email}", get(assigned_tasks))
}

async fn list_tasks(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_tasks()?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

/// The denormalized snapshot view — entries carry no `assignedTo` and no
/// timestamps.
async fn assigned_tasks(
    State(svc): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.assigned_tasks(&email)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_task(
    State(svc): State<AppState>,
    Extension(role): Extension<Role>,
    Json(input): Json<CreateTask>,
) -> Result<(axum::http::StatusCode, Json<Task>), ServiceError> {
    let task = svc.create_task(input, role)?;
    Ok((axum::http::StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(svc): State<AppState>,
    Extension(role): Extension<Role>,
    Path(task_id): Path<String>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Task>, ServiceError> {
    let task = svc.update_task(&task_id, &update, role)?;
    Ok(Json(task))
}

async fn delete_task(
    State(svc): State<AppState>,
    Extension(role): Extension<Role>,
    Path(task_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_task(&task_id, role)?;
    Ok(Json(serde_json::json!({ "message": "task deleted" })))
}

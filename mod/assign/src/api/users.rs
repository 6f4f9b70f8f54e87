use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use taskboard_core::ServiceError;

use crate::api::AppState;
use crate::model::{CreateUser, User};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_employees).post(create_user))
        .route(
            "/users/{email}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_employees(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_employees()?;
    let items: Vec<serde_json::Value> = result.items.iter().map(User::public_json).collect();
    Ok(Json(serde_json::json!({
        "items": items,
        "total": result.total,
    })))
}

async fn create_user(
    State(svc): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let user = svc.create_user(input)?;
    Ok((axum::http::StatusCode::CREATED, Json(user.public_json())))
}

async fn get_user(
    State(svc): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.get_user(&email)?;
    Ok(Json(user.public_json()))
}

async fn update_user(
    State(svc): State<AppState>,
    Path(email): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.update_user(&email, patch)?;
    Ok(Json(user.public_json()))
}

/// Cascade delete: the user and every task assigned to it go together.
async fn delete_user(
    State(svc): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_user(&email)?;
    Ok(Json(serde_json::json!({
        "message": "user and assigned tasks deleted",
    })))
}

mod middleware;
mod tasks;
mod users;

use std::sync::Arc;

use axum::Router;

use crate::service::AssignService;

/// Shared application state.
pub type AppState = Arc<AssignService>;

/// Build the complete assign API router.
///
/// All routes are relative — the caller nests them under `/assign`. Every
/// route sits behind the role-header middleware.
pub fn build_router(svc: Arc<AssignService>) -> Router {
    Router::new()
        .merge(tasks::routes())
        .merge(users::routes())
        .layer(axum::middleware::from_fn(middleware::require_role))
        .with_state(svc)
}

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use taskboard_core::ServiceError;

use crate::model::Role;

/// Header carrying the caller role, set by the upstream authentication
/// layer. Trusted as-is; this service never sees credentials.
pub const ROLE_HEADER: &str = "x-caller-role";

/// Resolve the caller role from the trusted header and expose it as a
/// request extension. Requests without a valid role are rejected before
/// any handler runs.
pub async fn require_role(mut req: Request, next: Next) -> Response {
    let role = req
        .headers()
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(Role::from_str);

    match role {
        Some(role) => {
            req.extensions_mut().insert(role);
            next.run(req).await
        }
        None => {
            ServiceError::Unauthorized(format!("missing or invalid {ROLE_HEADER} header"))
                .into_response()
        }
    }
}

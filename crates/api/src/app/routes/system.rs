use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::PrincipalContext;
use crate::guard;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    Json(serde_json::json!({
        "user_id": p.user_id().map(|id| id.to_string()),
        "roles": p.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "is_superuser": p.is_superuser(),
    }))
    .into_response()
}

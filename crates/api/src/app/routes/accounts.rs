use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crm_auth::{Destination, unauthenticated_only};
use crm_orders::OrderStats;

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;
use crate::guard;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", get(login))
        .route("/logout", post(logout))
}

/// Self-registration: creates an account with the `customer` role plus a
/// linked customer record, and returns a session token.
///
/// Gated so already-authenticated callers are sent home instead.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::RegisterAccountRequest>,
) -> axum::response::Response {
    let p = principal.principal();

    guard::respond(unauthenticated_only(p, || {
        let user = match services.register_account(&body.username, body.contact.clone()) {
            Ok(user) => user,
            Err(e) => return errors::domain_error_to_response(e),
        };

        let token = match services.issue_session(&user) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("failed to issue session token: {e}");
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "token_error",
                    "failed to issue session token",
                );
            }
        };

        (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "user_id": user.id.to_string(),
                "username": user.username,
                "roles": user.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
                "customer_id": user.customer_id.map(|id| id.to_string()),
                "token": token,
            })),
        )
            .into_response()
    }))
}

/// Login page stand-in: token issuance is owned by the identity layer, so
/// this only tells unauthenticated callers how to proceed. Authenticated
/// callers are redirected home.
pub async fn login(Extension(principal): Extension<PrincipalContext>) -> axum::response::Response {
    let p = principal.principal();

    guard::respond(unauthenticated_only(p, || {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "detail": "authenticate with a bearer token; new customers can POST /accounts/register",
            })),
        )
            .into_response()
    }))
}

/// Sessions are stateless bearer tokens; logout just sends the caller back
/// to the login page.
pub async fn logout() -> axum::response::Response {
    guard::redirect_to(Destination::Login)
}

/// The customer-facing "user page": the caller's own orders and counts.
pub async fn user_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    let Some(user_id) = p.user_id() else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "no account for session");
    };

    let Some(customer) = services.customer_for_user(user_id) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no customer record linked to this account",
        );
    };

    let orders = services.orders_for_customer(customer.id());
    let stats = OrderStats::from_orders(&orders);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "customer": dto::customer_to_json(&customer),
            "orders": orders.iter().map(dto::order_to_json).collect::<Vec<_>>(),
            "total_orders": stats.total,
            "pending_count": stats.pending,
            "delivered_count": stats.delivered,
        })),
    )
        .into_response()
}

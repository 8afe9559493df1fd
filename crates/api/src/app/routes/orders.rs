use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
};

use crm_auth::superuser_only;
use crm_core::{CustomerId, OrderId, ProductId};
use crm_orders::OrderStatus;

use crate::app::routes::common::parse_id;
use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;
use crate::guard;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:id", patch(update_order).delete(delete_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond_superuser(superuser_only(p, || {
        let customer_id: Option<CustomerId> = match body.customer_id.as_deref().map(parse_id) {
            Some(Ok(v)) => Some(v),
            Some(Err(response)) => return response,
            None => None,
        };
        let product_id: Option<ProductId> = match body.product_id.as_deref().map(parse_id) {
            Some(Ok(v)) => Some(v),
            Some(Err(response)) => return response,
            None => None,
        };
        let status = match body.status.as_deref() {
            Some(raw) => match raw.parse::<OrderStatus>() {
                Ok(v) => v,
                Err(e) => return errors::domain_error_to_response(e),
            },
            None => OrderStatus::Pending,
        };

        match services.order_place(customer_id, product_id, status, body.note.clone()) {
            Ok(order) => (StatusCode::CREATED, Json(dto::order_to_json(&order))).into_response(),
            Err(e) => errors::domain_error_to_response(e),
        }
    }))
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderRequest>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond_superuser(superuser_only(p, || {
        let order_id: OrderId = match parse_id(&id) {
            Ok(v) => v,
            Err(response) => return response,
        };
        let product_id: Option<ProductId> = match body.product_id.as_deref().map(parse_id) {
            Some(Ok(v)) => Some(v),
            Some(Err(response)) => return response,
            None => None,
        };
        let status = match body.status.as_deref() {
            Some(raw) => match raw.parse::<OrderStatus>() {
                Ok(v) => Some(v),
                Err(e) => return errors::domain_error_to_response(e),
            },
            None => None,
        };

        match services.order_update(order_id, status, body.note.clone(), product_id) {
            Ok(order) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
            Err(e) => errors::domain_error_to_response(e),
        }
    }))
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond_superuser(superuser_only(p, || {
        let order_id: OrderId = match parse_id(&id) {
            Ok(v) => v,
            Err(response) => return response,
        };

        match services.order_delete(order_id) {
            Ok(()) => (
                StatusCode::OK,
                Json(serde_json::json!({ "id": id, "deleted": true })),
            )
                .into_response(),
            Err(e) => errors::domain_error_to_response(e),
        }
    }))
}

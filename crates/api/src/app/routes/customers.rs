use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crm_auth::superuser_only;
use crm_core::CustomerId;
use crm_orders::OrderFilter;

use crate::app::routes::common::parse_id;
use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;
use crate::guard;

pub fn router() -> Router {
    Router::new().route(
        "/:id",
        get(get_customer).patch(update_customer).delete(delete_customer),
    )
}

/// Customer detail with their orders, filterable via query parameters.
pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::OrderFilterQuery>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond_superuser(superuser_only(p, || {
        customer_detail(&services, &id, query)
    }))
}

fn customer_detail(
    services: &AppServices,
    id: &str,
    query: dto::OrderFilterQuery,
) -> axum::response::Response {
    let customer_id: CustomerId = match parse_id(id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    let Some(customer) = services.customer_get(customer_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    };

    let filter: OrderFilter = match query.into_filter() {
        Ok(f) => f,
        Err(response) => return response,
    };

    let orders = filter.apply(services.orders_for_customer(customer_id));

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "customer": dto::customer_to_json(&customer),
            "orders": orders.iter().map(dto::order_to_json).collect::<Vec<_>>(),
            "orders_count": orders.len(),
        })),
    )
        .into_response()
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCustomerRequest>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    let customer_id: CustomerId = match parse_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match services.customer_update(customer_id, body.name, body.contact) {
        Ok(customer) => (StatusCode::OK, Json(dto::customer_to_json(&customer))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond_superuser(superuser_only(p, || {
        let customer_id: CustomerId = match parse_id(&id) {
            Ok(v) => v,
            Err(response) => return response,
        };

        match services.customer_delete(customer_id) {
            Ok(()) => (
                StatusCode::OK,
                Json(serde_json::json!({ "id": id, "deleted": true })),
            )
                .into_response(),
            Err(e) => errors::domain_error_to_response(e),
        }
    }))
}

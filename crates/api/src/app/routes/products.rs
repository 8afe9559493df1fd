use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};

use crm_auth::{AllowedRoles, Role};

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;
use crate::guard;

pub fn router() -> Router {
    Router::new().route("/", get(list_products).post(create_product))
}

fn staff_gate() -> AllowedRoles {
    AllowedRoles::new([Role::ADMIN])
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond(staff_gate().check(p, || {
        let items = services
            .products_list()
            .iter()
            .map(dto::product_to_json)
            .collect::<Vec<_>>();
        (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
    }))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond(staff_gate().check(p, || {
        match services.product_create(
            &body.name,
            body.price,
            body.category,
            body.description.clone(),
            body.tags.clone().unwrap_or_default(),
        ) {
            Ok(product) => {
                (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
            }
            Err(e) => errors::domain_error_to_response(e),
        }
    }))
}

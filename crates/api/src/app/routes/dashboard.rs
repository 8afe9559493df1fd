use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crm_auth::{admin_only, superuser_only};

use crate::app::{dto, services::AppServices};
use crate::context::PrincipalContext;
use crate::guard;

/// The "home" dashboard: all customers, all orders, and order counts.
///
/// Gate stack (outermost first): login required, then admin-only, then
/// superuser-only. Customers are bounced to their own page before the
/// superuser check ever runs.
pub async fn home(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let p = principal.principal();
    if let Err(redirect) = guard::require_login(p) {
        return redirect;
    }

    guard::respond_gated(admin_only(p, || {
        superuser_only(p, || {
            let (customers, orders, stats) = services.dashboard();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "customers": customers.iter().map(dto::customer_to_json).collect::<Vec<_>>(),
                    "orders": orders.iter().map(dto::order_to_json).collect::<Vec<_>>(),
                    "total_orders": stats.total,
                    "pending_count": stats.pending,
                    "delivered_count": stats.delivered,
                })),
            )
                .into_response()
        })
    }))
}

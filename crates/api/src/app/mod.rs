//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: in-memory stores and account/CRM operations
//! - `store.rs`: the key/value store abstraction behind the services
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod store;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: String) -> Router {
    let jwt = Arc::new(crm_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt: jwt.clone() };

    let services = Arc::new(services::AppServices::new(jwt));

    // Gated routes: every handler sees a principal (possibly anonymous).
    let gated = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::principal_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(gated)
        .layer(ServiceBuilder::new())
}

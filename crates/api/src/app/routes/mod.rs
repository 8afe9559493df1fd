use axum::{Router, routing::get};

pub mod accounts;
pub mod common;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod system;

/// Router for all gated endpoints (handlers see a principal, possibly
/// anonymous, and apply their own gate stack).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/dashboard", get(dashboard::home))
        .route("/user", get(accounts::user_page))
        .nest("/accounts", accounts::router())
        .nest("/customers", customers::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}

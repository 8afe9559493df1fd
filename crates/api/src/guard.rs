//! HTTP adapters for the authorization gate.
//!
//! Gate decisions are plain values; this module owns their mapping onto
//! responses: redirects become `303` with a `Location` header, rejections and
//! access denials become `403` JSON, and the empty outcome becomes `204`.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crm_auth::{AccessDenied, Destination, Outcome, Principal, Rejection};

use crate::app::errors;

/// Map an abstract destination to its route.
pub fn destination_path(dest: Destination) -> &'static str {
    match dest {
        Destination::Home => "/dashboard",
        Destination::UserPage => "/user",
        Destination::Login => "/accounts/login",
    }
}

pub fn redirect_to(dest: Destination) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, destination_path(dest))],
    )
        .into_response()
}

/// Login gate applied before any role gate: anonymous callers are sent to
/// the login page.
pub fn require_login(principal: &Principal) -> Result<(), Response> {
    if principal.is_authenticated() {
        Ok(())
    } else {
        Err(redirect_to(Destination::Login))
    }
}

/// Map a gate outcome whose handler already produced a response.
pub fn respond(outcome: Outcome<Response>) -> Response {
    match outcome {
        Outcome::Forwarded(response) => response,
        Outcome::Redirect(dest) => redirect_to(dest),
        Outcome::Rejected(rejection) => rejection_response(rejection),
        Outcome::Empty => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Map a stacked outcome whose innermost layer is the superuser gate.
pub fn respond_gated(outcome: Outcome<Result<Response, AccessDenied>>) -> Response {
    respond(outcome.map(|inner| inner.unwrap_or_else(denied_response)))
}

/// Map a bare superuser-gate result.
pub fn respond_superuser(result: Result<Response, AccessDenied>) -> Response {
    result.unwrap_or_else(denied_response)
}

pub fn denied_response(err: AccessDenied) -> Response {
    errors::json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

fn rejection_response(rejection: Rejection) -> Response {
    (
        StatusCode::FORBIDDEN,
        axum::Json(serde_json::json!({
            "error": "not_authorized",
            "message": rejection.message,
            "role": rejection.role.as_str(),
        })),
    )
        .into_response()
}

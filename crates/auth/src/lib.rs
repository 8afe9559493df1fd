//! `crm-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the gate
//! reads only the [`Principal`] attached to the current call and never
//! performs IO.

pub mod claims;
pub mod gate;
pub mod jwt;
pub mod principal;
pub mod roles;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use gate::{
    AccessDenied, AllowedRoles, Destination, Outcome, Rejection, admin_only, superuser_only,
    unauthenticated_only,
};
pub use jwt::{Hs256JwtValidator, JwtValidator, TokenError};
pub use principal::Principal;
pub use roles::Role;

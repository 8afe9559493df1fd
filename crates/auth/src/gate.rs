//! Role-based authorization gate.
//!
//! Each gate wraps a handler (any `FnOnce() -> R`): it inspects the current
//! [`Principal`] and either forwards the call or substitutes a non-forwarded
//! outcome. Gates are stateless and evaluated fresh per call.
//!
//! Gates are designed to stack, outermost to innermost, around a single
//! handler; each layer short-circuits before inner layers run, so an
//! unauthenticated caller never reaches role checks.
//!
//! Only [`superuser_only`] signals a hard error ([`AccessDenied`]). The other
//! gates resolve entirely through ordinary [`Outcome`] values.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Principal, Role};

/// Fixed rejection text returned by the allowed-roles gate.
pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to view this page";

/// Where a gate decision sends the caller instead of running the handler.
///
/// Destinations are opaque identifiers here; the HTTP layer owns the mapping
/// to concrete paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    UserPage,
    Login,
}

/// Terminal rejection carrying the fixed message and the offending role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub message: &'static str,
    pub role: Role,
}

/// Result of running a gated handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    /// The gate forwarded the call; this is the handler's own output.
    Forwarded(R),
    /// The caller was sent elsewhere; the handler never ran.
    Redirect(Destination),
    /// Terminal rejection; the handler never ran.
    Rejected(Rejection),
    /// Defined no-op outcome; the handler never ran.
    Empty,
}

impl<R> Outcome<R> {
    /// The handler output, if the call was forwarded.
    pub fn forwarded(self) -> Option<R> {
        match self {
            Outcome::Forwarded(r) => Some(r),
            _ => None,
        }
    }

    /// Map the handler output while preserving non-forwarded outcomes.
    pub fn map<T>(self, f: impl FnOnce(R) -> T) -> Outcome<T> {
        match self {
            Outcome::Forwarded(r) => Outcome::Forwarded(f(r)),
            Outcome::Redirect(d) => Outcome::Redirect(d),
            Outcome::Rejected(rej) => Outcome::Rejected(rej),
            Outcome::Empty => Outcome::Empty,
        }
    }
}

/// Hard failure raised by [`superuser_only`] for non-elevated principals.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("access denied: superuser privilege required")]
pub struct AccessDenied;

/// Gate for pages that only make sense *before* login (login, registration).
///
/// Already-authenticated callers are sent home; everyone else is forwarded.
pub fn unauthenticated_only<R>(principal: &Principal, handler: impl FnOnce() -> R) -> Outcome<R> {
    if principal.is_authenticated() {
        Outcome::Redirect(Destination::Home)
    } else {
        Outcome::Forwarded(handler())
    }
}

/// Gate configured with an explicit set of permitted role names.
///
/// An empty set permits nobody. The decision key is the principal's primary
/// role (first membership, or the `"none"` sentinel).
#[derive(Debug, Clone, Default)]
pub struct AllowedRoles {
    allowed: HashSet<Role>,
}

impl AllowedRoles {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
        }
    }

    pub fn permits(&self, role: &Role) -> bool {
        self.allowed.contains(role)
    }

    /// Forward iff the principal's primary role is permitted; otherwise a
    /// terminal rejection carrying that role. Never redirects, never errors.
    pub fn check<R>(&self, principal: &Principal, handler: impl FnOnce() -> R) -> Outcome<R> {
        let role = principal.primary_role();
        if self.permits(&role) {
            Outcome::Forwarded(handler())
        } else {
            tracing::debug!(role = %role, "allowed-roles gate rejected caller");
            Outcome::Rejected(Rejection {
                message: NOT_AUTHORIZED_MESSAGE,
                role,
            })
        }
    }
}

/// Gate for staff-only pages, with a customer escape hatch.
///
/// Customers are redirected to their own page; admins are forwarded. Any
/// other role, including the `"none"` sentinel, yields [`Outcome::Empty`]:
/// there is deliberately no fallback branch, so the three-way split must not
/// be collapsed into a rejection.
pub fn admin_only<R>(principal: &Principal, handler: impl FnOnce() -> R) -> Outcome<R> {
    let role = principal.primary_role();
    if role == Role::CUSTOMER {
        return Outcome::Redirect(Destination::UserPage);
    }
    if role == Role::ADMIN {
        return Outcome::Forwarded(handler());
    }
    Outcome::Empty
}

/// Gate for operations reserved to elevated accounts.
///
/// The only gate that raises: a non-superuser principal terminates the call
/// with [`AccessDenied`], which the surrounding layer turns into a forbidden
/// response.
pub fn superuser_only<R>(
    principal: &Principal,
    handler: impl FnOnce() -> R,
) -> Result<R, AccessDenied> {
    if !principal.is_superuser() {
        return Err(AccessDenied);
    }
    Ok(handler())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::UserId;
    use std::cell::Cell;

    fn customer() -> Principal {
        Principal::authenticated(UserId::new(), vec![Role::CUSTOMER])
    }

    fn admin() -> Principal {
        Principal::authenticated(UserId::new(), vec![Role::ADMIN])
    }

    fn admin_superuser() -> Principal {
        Principal::superuser(UserId::new(), vec![Role::ADMIN])
    }

    fn roleless() -> Principal {
        Principal::authenticated(UserId::new(), vec![])
    }

    #[test]
    fn unauthenticated_only_redirects_authenticated_callers_home() {
        let ran = Cell::new(false);
        let out = unauthenticated_only(&customer(), || ran.set(true));
        assert_eq!(out, Outcome::Redirect(Destination::Home));
        assert!(!ran.get());
    }

    #[test]
    fn unauthenticated_only_forwards_anonymous_callers() {
        let out = unauthenticated_only(&Principal::anonymous(), || 42);
        assert_eq!(out, Outcome::Forwarded(42));
    }

    #[test]
    fn allowed_roles_forwards_member_roles() {
        let gate = AllowedRoles::new([Role::ADMIN]);
        assert_eq!(gate.check(&admin(), || "ok"), Outcome::Forwarded("ok"));
    }

    #[test]
    fn allowed_roles_rejects_with_offending_role() {
        let gate = AllowedRoles::new([Role::ADMIN]);
        let ran = Cell::new(false);
        match gate.check(&customer(), || ran.set(true)) {
            Outcome::Rejected(rej) => {
                assert_eq!(rej.message, NOT_AUTHORIZED_MESSAGE);
                assert_eq!(rej.role, Role::CUSTOMER);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(!ran.get());
    }

    #[test]
    fn allowed_roles_empty_set_permits_nobody() {
        let gate = AllowedRoles::default();
        for p in [admin(), customer(), roleless(), Principal::anonymous()] {
            assert!(matches!(gate.check(&p, || ()), Outcome::Rejected(_)));
        }
    }

    #[test]
    fn allowed_roles_treats_missing_membership_as_none_sentinel() {
        let gate = AllowedRoles::new([Role::NONE]);
        assert_eq!(gate.check(&roleless(), || 1), Outcome::Forwarded(1));

        let gate = AllowedRoles::new([Role::ADMIN]);
        match gate.check(&roleless(), || ()) {
            Outcome::Rejected(rej) => assert_eq!(rej.role, Role::NONE),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn admin_only_redirects_customers_to_user_page() {
        let ran = Cell::new(false);
        let out = admin_only(&customer(), || ran.set(true));
        assert_eq!(out, Outcome::Redirect(Destination::UserPage));
        assert!(!ran.get());
    }

    #[test]
    fn admin_only_forwards_admins() {
        assert_eq!(admin_only(&admin(), || "body"), Outcome::Forwarded("body"));
    }

    #[test]
    fn admin_only_is_empty_for_any_other_role() {
        let ran = Cell::new(false);
        assert_eq!(admin_only(&roleless(), || ran.set(true)), Outcome::Empty);

        let warehouse = Principal::authenticated(UserId::new(), vec![Role::new("warehouse")]);
        assert_eq!(admin_only(&warehouse, || ran.set(true)), Outcome::Empty);
        assert!(!ran.get());
    }

    #[test]
    fn superuser_only_denies_non_elevated_principals() {
        let ran = Cell::new(false);
        let err = superuser_only(&admin(), || ran.set(true)).unwrap_err();
        assert_eq!(err, AccessDenied);
        assert!(!ran.get());
    }

    #[test]
    fn superuser_only_forwards_elevated_principals() {
        let out = superuser_only(&admin_superuser(), || "body").unwrap();
        assert_eq!(out, "body");
    }

    #[test]
    fn stacked_admin_superuser_gates_forward_for_elevated_admin() {
        // home page stack: admin_only wraps superuser_only wraps the handler.
        let p = admin_superuser();
        let out = admin_only(&p, || superuser_only(&p, || "dashboard"));
        match out {
            Outcome::Forwarded(Ok(body)) => assert_eq!(body, "dashboard"),
            other => panic!("expected forwarded handler output, got {other:?}"),
        }
    }

    #[test]
    fn stacked_gates_short_circuit_for_customers_before_superuser_check() {
        // A customer must be redirected by the outer gate; the inner
        // superuser gate (which would raise) is never evaluated.
        let p = customer();
        let out = admin_only(&p, || superuser_only(&p, || "dashboard"));
        assert_eq!(out, Outcome::Redirect(Destination::UserPage));
    }

    #[test]
    fn outcome_map_preserves_non_forwarded_variants() {
        let redirect: Outcome<u8> = Outcome::Redirect(Destination::Home);
        assert_eq!(redirect.map(|v| v + 1), Outcome::Redirect(Destination::Home));
        assert_eq!(Outcome::Forwarded(1).map(|v| v + 1), Outcome::Forwarded(2));
    }
}

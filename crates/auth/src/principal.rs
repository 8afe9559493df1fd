use serde::{Deserialize, Serialize};

use crm_core::UserId;

use crate::Role;

/// The authenticated (or anonymous) caller of a request.
///
/// Read from the surrounding identity/session layer and never mutated here.
/// In practice an account belongs to zero or one role; `roles` is kept as a
/// list so the first entry decides, matching the upstream identity model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: Option<UserId>,
    is_superuser: bool,
    roles: Vec<Role>,
}

impl Principal {
    /// A caller with no session at all.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            is_superuser: false,
            roles: Vec::new(),
        }
    }

    /// An authenticated, non-elevated caller.
    pub fn authenticated(user_id: UserId, roles: Vec<Role>) -> Self {
        Self {
            user_id: Some(user_id),
            is_superuser: false,
            roles,
        }
    }

    /// An authenticated caller with superuser privilege.
    pub fn superuser(user_id: UserId, roles: Vec<Role>) -> Self {
        Self {
            user_id: Some(user_id),
            is_superuser: true,
            roles,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// The role that drives gate decisions: the first membership, or the
    /// `"none"` sentinel when the principal has no role at all.
    pub fn primary_role(&self) -> Role {
        self.roles.first().cloned().unwrap_or(Role::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_principal_has_none_sentinel_role() {
        let p = Principal::anonymous();
        assert!(!p.is_authenticated());
        assert!(!p.is_superuser());
        assert_eq!(p.primary_role(), Role::NONE);
    }

    #[test]
    fn primary_role_is_first_membership() {
        let p = Principal::authenticated(
            UserId::new(),
            vec![Role::new("admin"), Role::new("customer")],
        );
        assert_eq!(p.primary_role(), Role::ADMIN);
    }
}

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for access-control decisions.
///
/// Roles are intentionally opaque strings at this layer; there is no
/// hierarchy and no permission composition, only name matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Staff role with full access to management pages.
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));

    /// End-customer role, confined to the user page.
    pub const CUSTOMER: Role = Role(Cow::Borrowed("customer"));

    /// Sentinel for principals with no role memberships.
    pub const NONE: Role = Role(Cow::Borrowed("none"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none_sentinel(&self) -> bool {
        *self == Self::NONE
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

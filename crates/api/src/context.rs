use crm_auth::Principal;

/// Principal context for a request (anonymous or authenticated identity).
///
/// Attached by the principal middleware; present on every gated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

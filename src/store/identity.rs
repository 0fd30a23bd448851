use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Identity { user_id: user_id.into(), display_name: display_name.into() }
    }
}

/// Source of the currently signed-in player, if any.
pub trait IdentityProvider {
    fn current(&self) -> Option<Identity>;

    fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }
}

/// Fixed identity, e.g. from config.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Identity>);

impl StaticIdentity {
    pub fn signed_in(identity: Identity) -> Self {
        StaticIdentity(Some(identity))
    }

    pub fn anonymous() -> Self {
        StaticIdentity(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.0.clone()
    }
}

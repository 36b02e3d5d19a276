// src/identity.rs — Identity provider boundary

use serde::{Deserialize, Serialize};

/// Opaque handle to the authenticated user. Supplied by whatever
/// auth layer fronts the application; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHandle {
    pub id: String,
    pub email: String,
}

pub trait Identity: Send + Sync {
    /// `None` means no session. Callers must treat an empty task
    /// snapshot as the correct output in that state, not an error.
    fn current_user(&self) -> Option<UserHandle>;
}

/// Fixed identity for the CLI and tests.
pub struct StaticIdentity(Option<UserHandle>);

impl StaticIdentity {
    pub fn signed_in(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self(Some(UserHandle {
            id: id.into(),
            email: email.into(),
        }))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

impl Identity for StaticIdentity {
    fn current_user(&self) -> Option<UserHandle> {
        self.0.clone()
    }
}

//! User domain entity and the explicit principal context

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

pub type UserId = i64;

/// An account that owns icons. Credentials and sessions live in the
/// transport layer; this row only carries identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub created_at: Option<i64>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// The authenticated caller, threaded explicitly into every operation
/// instead of being looked up from ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Build a principal from whatever the transport resolved its session
    /// to. An absent session is an `Unauthenticated` failure.
    pub fn require(session_user: Option<UserId>) -> DomainResult<Self> {
        session_user.map(Self::new).ok_or(DomainError::Unauthenticated)
    }
}

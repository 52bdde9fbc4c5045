//! Authenticated session snapshot.

use super::{Role, SessionId, UserId, UserProfile};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Authenticated session; serialized verbatim into the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    user: UserProfile,
    authenticated_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session for `user` at the current clock time.
    #[must_use]
    pub fn open(user: UserProfile, clock: &impl Clock) -> Self {
        Self {
            id: SessionId::new(),
            user,
            authenticated_at: clock.utc(),
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id
    }

    /// Returns the signed-in user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.user.role
    }

    /// Returns the login timestamp.
    #[must_use]
    pub const fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }
}

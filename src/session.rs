//! Auth session collaborator
//!
//! The session owns the bearer token and the signed-in user. Interceptors
//! read it through the [`Session`] trait and may trigger clearing; the login
//! flow populates it. How the embedding application persists it (keychain,
//! browser storage, nothing) is its own business.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Signed-in user as the session tracks them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    /// Display name
    pub full_name: String,
    /// Platform role: `admin`, `customer` or `professional`
    pub role: String,
}

/// Auth session collaborator
pub trait Session: Send + Sync {
    /// Current bearer token, if any
    fn token(&self) -> Option<String>;

    /// Role of the signed-in user, if any
    fn user_role(&self) -> Option<String>;

    /// Whether a token is present
    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a freshly issued token (login)
    fn establish(&self, token: String);

    /// Attach the signed-in user to the session
    fn set_user(&self, user: SessionUser);

    /// Drop token and user (logout, auth failure, account removal)
    fn clear(&self);
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<SessionUser>,
}

/// In-memory session
///
/// The default implementation; applications with their own persistent session
/// store implement [`Session`] themselves.
#[derive(Debug, Default)]
pub struct MemorySession {
    state: RwLock<SessionState>,
}

impl MemorySession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed-in user, if any
    pub fn user(&self) -> Option<SessionUser> {
        self.state.read().user.clone()
    }
}

impl Session for MemorySession {
    fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    fn user_role(&self) -> Option<String> {
        self.state.read().user.as_ref().map(|u| u.role.clone())
    }

    fn establish(&self, token: String) {
        self.state.write().token = Some(token);
    }

    fn set_user(&self, user: SessionUser) {
        self.state.write().user = Some(user);
    }

    fn clear(&self) {
        *self.state.write() = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let session = MemorySession::new();
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
        assert_eq!(session.user_role(), None);

        session.establish("tok".to_string());
        session.set_user(SessionUser {
            full_name: "Asha Rao".to_string(),
            role: "customer".to_string(),
        });
        assert!(session.is_logged_in());
        assert_eq!(session.user_role().as_deref(), Some("customer"));

        session.clear();
        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
    }
}

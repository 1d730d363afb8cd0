//! Latest-known-value session identity.
//!
//! The embedding app writes the authenticated user id here when the auth
//! provider reports a change; the engine reads it at quest start and unlock
//! evaluation. This replaces a process-wide token singleton with an explicit
//! cell that is passed to the engine by the composition root.

use std::sync::RwLock;

use lingotrail_domain::UserId;

use crate::infrastructure::ports::SessionIdentityPort;

#[derive(Debug, Default)]
pub struct SessionIdentity {
    current: RwLock<Option<UserId>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            current: RwLock::new(Some(user_id)),
        }
    }

    pub fn set(&self, user_id: UserId) {
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(user_id);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
    }
}

impl SessionIdentityPort for SessionIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.current.read().ok().and_then(|guard| *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_signed_out() {
        let identity = SessionIdentity::new();
        assert!(identity.current_user_id().is_none());
    }

    #[test]
    fn test_set_and_clear() {
        let identity = SessionIdentity::new();
        let user = UserId::new();
        identity.set(user);
        assert_eq!(identity.current_user_id(), Some(user));
        identity.clear();
        assert!(identity.current_user_id().is_none());
    }
}

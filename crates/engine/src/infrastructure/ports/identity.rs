//! Session identity port.
//!
//! Supplies the current authenticated user id as a latest-known value. The
//! engine pulls it at well-defined points (quest start, unlock evaluation)
//! rather than subscribing to a live stream, and never holds it in ambient
//! global state.

use lingotrail_domain::UserId;

#[cfg_attr(test, mockall::automock)]
pub trait SessionIdentityPort: Send + Sync {
    /// The currently authenticated user, if any.
    fn current_user_id(&self) -> Option<UserId>;
}

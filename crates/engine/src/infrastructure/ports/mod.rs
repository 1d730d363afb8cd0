//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Content service access (could swap REST -> local cache/fixture store)
//! - Session identity (current user, injected instead of a global holder)
//! - Clock (for testing)

mod error;
mod identity;
mod repos;
mod testing;

// =============================================================================
// Content Store Ports
// =============================================================================
pub use repos::{AnswerVerdict, DialogueRepo, ProgressRepo, QuestRepo};

// =============================================================================
// Identity / Testability Ports
// =============================================================================
pub use identity::SessionIdentityPort;
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use identity::MockSessionIdentityPort;
#[cfg(test)]
pub use repos::{MockDialogueRepo, MockProgressRepo, MockQuestRepo};
#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;

//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod traversal;
pub mod unlock;

// Re-export main types
pub use traversal::{QuestTraversal, TraversalError, TraversalState, FEEDBACK_DISPLAY_DELAY};
pub use unlock::{EvaluateQuestUnlocks, QuestUnlockEntry, UnlockError};

//! LingoTrail Engine library.
//!
//! The quest/dialogue progression engine: walks a quest's dialogue graph
//! scene-by-scene, grades answers through the remote content service, and
//! computes quest availability within a quest-point.
//!
//! ## Structure
//!
//! - `entities/` - Entity wrappers over content store ports
//! - `use_cases/` - Traversal state machine and unlock evaluation
//! - `infrastructure/` - Ports plus concrete adapters (REST client, clock,
//!   session identity)

pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use use_cases::{
    EvaluateQuestUnlocks, QuestTraversal, QuestUnlockEntry, TraversalError, TraversalState,
    UnlockError,
};

extern crate self as lingotrail_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Choice, DialogueNode, DifficultyTier, InputMode, ProficiencyTier, ProgressStatus, Quest,
    QuestPoint, Speaker, UnlockRequirement, UserQuestProgress,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{CityId, DialogueId, ProgressId, QuestId, QuestPointId, SpeakerId, UserId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{QuestStatus, SessionStats, SessionSummary, XP_PER_CORRECT_ANSWER};

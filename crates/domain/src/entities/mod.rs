//! Domain entities.

mod dialogue;
mod progress;
mod quest;
mod quest_point;

pub use dialogue::{Choice, DialogueNode, InputMode, Speaker};
pub use progress::{ProgressStatus, UserQuestProgress};
pub use quest::{DifficultyTier, ProficiencyTier, Quest, UnlockRequirement};
pub use quest_point::QuestPoint;

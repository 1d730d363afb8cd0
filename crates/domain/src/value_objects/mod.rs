//! Value objects.

mod quest_status;
mod session_stats;

pub use quest_status::QuestStatus;
pub use session_stats::{SessionStats, SessionSummary, XP_PER_CORRECT_ANSWER};

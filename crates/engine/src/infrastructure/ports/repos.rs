//! Repository port traits for content service access.

use std::collections::HashMap;

use async_trait::async_trait;
use lingotrail_domain::{
    DialogueId, DialogueNode, ProgressId, Quest, QuestId, QuestPointId, Speaker, SpeakerId, UserId,
    UserQuestProgress,
};

use super::error::RepoError;

/// Correctness verdict returned by the content service for one submitted
/// answer.
///
/// `resolved_next_dialogue_id` is the server-side override for the next node
/// (for choice answers: the choice's own target when it has one). `None`
/// means the server left resolution to the client's local fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerVerdict {
    pub correct: bool,
    pub resolved_next_dialogue_id: Option<DialogueId>,
}

// =============================================================================
// Content Store Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    async fn get(&self, id: QuestId) -> Result<Option<Quest>, RepoError>;

    /// All quests of a quest-point, in no guaranteed order; callers sort by
    /// `sequence_key`.
    async fn list_for_quest_point(
        &self,
        quest_point_id: QuestPointId,
    ) -> Result<Vec<Quest>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueRepo: Send + Sync {
    async fn get(&self, id: DialogueId) -> Result<Option<DialogueNode>, RepoError>;
    async fn get_speaker(&self, id: SpeakerId) -> Result<Option<Speaker>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepo: Send + Sync {
    /// Returns the existing record for (user, quest), creating one seeded at
    /// the quest's first dialogue node if absent. Creation is exactly-once
    /// on the service side: two concurrent calls yield the same record.
    async fn get_or_create(
        &self,
        user_id: UserId,
        quest_id: QuestId,
    ) -> Result<UserQuestProgress, RepoError>;

    /// Submits one answer for grading. The service updates the stored
    /// resumption point on a correct answer.
    async fn submit_answer(
        &self,
        progress_id: ProgressId,
        dialogue_id: DialogueId,
        answer: &str,
    ) -> Result<AnswerVerdict, RepoError>;

    /// Marks the quest completed. Idempotent: a second call yields the same
    /// final record with no duplicate side effects.
    async fn mark_completed(&self, progress_id: ProgressId)
        -> Result<UserQuestProgress, RepoError>;

    /// Batched progress lookup for a quest list. Quests with no record are
    /// simply absent from the map.
    async fn list_for_user(
        &self,
        quest_ids: &[QuestId],
        user_id: UserId,
    ) -> Result<HashMap<QuestId, UserQuestProgress>, RepoError>;
}

//! Progress entity operations.

use std::collections::HashMap;
use std::sync::Arc;

use lingotrail_domain::{DialogueId, ProgressId, QuestId, UserId, UserQuestProgress};

use crate::infrastructure::ports::{AnswerVerdict, ProgressRepo, RepoError};

/// Progress entity operations.
pub struct Progress {
    repo: Arc<dyn ProgressRepo>,
}

impl Progress {
    pub fn new(repo: Arc<dyn ProgressRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_or_create(
        &self,
        user_id: UserId,
        quest_id: QuestId,
    ) -> Result<UserQuestProgress, RepoError> {
        self.repo.get_or_create(user_id, quest_id).await
    }

    pub async fn submit_answer(
        &self,
        progress_id: ProgressId,
        dialogue_id: DialogueId,
        answer: &str,
    ) -> Result<AnswerVerdict, RepoError> {
        self.repo.submit_answer(progress_id, dialogue_id, answer).await
    }

    pub async fn mark_completed(
        &self,
        progress_id: ProgressId,
    ) -> Result<UserQuestProgress, RepoError> {
        self.repo.mark_completed(progress_id).await
    }

    pub async fn list_for_user(
        &self,
        quest_ids: &[QuestId],
        user_id: UserId,
    ) -> Result<HashMap<QuestId, UserQuestProgress>, RepoError> {
        self.repo.list_for_user(quest_ids, user_id).await
    }
}

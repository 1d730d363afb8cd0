//! Quest entity operations.

use std::sync::Arc;

use lingotrail_domain::{self as domain, QuestId, QuestPointId};

use crate::infrastructure::ports::{QuestRepo, RepoError};

/// Quest entity operations.
pub struct Quest {
    repo: Arc<dyn QuestRepo>,
}

impl Quest {
    pub fn new(repo: Arc<dyn QuestRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: QuestId) -> Result<Option<domain::Quest>, RepoError> {
        self.repo.get(id).await
    }

    /// The quest-point's quests in display order: `order_index`, ties broken
    /// by id for determinism.
    pub async fn list_for_quest_point_ordered(
        &self,
        quest_point_id: QuestPointId,
    ) -> Result<Vec<domain::Quest>, RepoError> {
        let mut quests = self.repo.list_for_quest_point(quest_point_id).await?;
        quests.sort_by_key(domain::Quest::sequence_key);
        Ok(quests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockQuestRepo;
    use lingotrail_domain::DifficultyTier;

    #[tokio::test]
    async fn test_list_is_sorted_by_order_index_then_id() {
        let point = QuestPointId::new();
        let first = domain::Quest::new(point, "First", 0, DifficultyTier::Beginner);
        let second = domain::Quest::new(point, "Second", 1, DifficultyTier::Beginner);
        let third = domain::Quest::new(point, "Third", 2, DifficultyTier::Intermediate);

        let shuffled = vec![third.clone(), first.clone(), second.clone()];
        let mut repo = MockQuestRepo::new();
        repo.expect_list_for_quest_point()
            .returning(move |_| Ok(shuffled.clone()));

        let quests = Quest::new(Arc::new(repo))
            .list_for_quest_point_ordered(point)
            .await
            .expect("list quests");

        let ids: Vec<_> = quests.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }
}

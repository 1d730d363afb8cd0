//! Quest unlock evaluation use case.
//!
//! Computes one availability status per quest of a quest-point: `completed`
//! and `in_progress` come straight from the stored progress record; quests
//! with no record are `available` only when every earlier sibling is
//! completed, else `locked`. Monotonic availability holds by construction:
//! the single pass carries a `previous_completed` flag that only an actually
//! completed quest can set.

use std::collections::HashMap;
use std::sync::Arc;

use lingotrail_domain::{
    Quest as QuestDef, QuestId, QuestPointId, QuestStatus, UserQuestProgress,
};

use crate::entities::{Progress, Quest};
use crate::infrastructure::ports::{RepoError, SessionIdentityPort};

/// Computed status for one quest, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestUnlockEntry {
    pub quest_id: QuestId,
    pub status: QuestStatus,
}

/// Quest unlock evaluator.
///
/// Runs once when a quest-point's quest list is displayed. Progress records
/// are fetched in one batched call; a failed batch degrades to "no records"
/// for the whole list rather than producing a partial or aborted view.
pub struct EvaluateQuestUnlocks {
    quest: Arc<Quest>,
    progress: Arc<Progress>,
    identity: Arc<dyn SessionIdentityPort>,
}

impl EvaluateQuestUnlocks {
    pub fn new(
        quest: Arc<Quest>,
        progress: Arc<Progress>,
        identity: Arc<dyn SessionIdentityPort>,
    ) -> Self {
        Self {
            quest,
            progress,
            identity,
        }
    }

    pub async fn execute(
        &self,
        quest_point_id: QuestPointId,
    ) -> Result<Vec<QuestUnlockEntry>, UnlockError> {
        let user_id = self
            .identity
            .current_user_id()
            .ok_or(UnlockError::NotAuthenticated)?;

        let quests = self.quest.list_for_quest_point_ordered(quest_point_id).await?;
        let quest_ids: Vec<QuestId> = quests.iter().map(|q| q.id).collect();

        let records = match self.progress.list_for_user(&quest_ids, user_id).await {
            Ok(records) => records,
            Err(e) => {
                // Degrade to sequencing-only rather than locking the whole
                // quest-point behind one flaky lookup.
                tracing::warn!(
                    quest_point_id = %quest_point_id,
                    error = %e,
                    "Progress lookup failed; evaluating unlocks without records"
                );
                HashMap::new()
            }
        };

        Ok(evaluate(&quests, &records))
    }
}

/// Single O(n) pass over quests already sorted by `(order_index, id)`.
pub fn evaluate(
    quests: &[QuestDef],
    records: &HashMap<QuestId, UserQuestProgress>,
) -> Vec<QuestUnlockEntry> {
    // The first quest has no predecessor and is never locked by sequencing.
    let mut previous_completed = true;
    let mut entries = Vec::with_capacity(quests.len());

    for quest in quests {
        let status = match records.get(&quest.id) {
            Some(record) => QuestStatus::from(record.status),
            None if previous_completed => QuestStatus::Available,
            None => QuestStatus::Locked,
        };
        previous_completed = status == QuestStatus::Completed;
        entries.push(QuestUnlockEntry {
            quest_id: quest.id,
            status,
        });
    }

    entries
}

#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    #[error("No authenticated user")]
    NotAuthenticated,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use lingotrail_domain::{DialogueId, DifficultyTier, UserId};

    use super::*;
    use crate::entities;
    use crate::infrastructure::ports::{
        MockProgressRepo, MockQuestRepo, MockSessionIdentityPort,
    };

    fn quest_chain(point: QuestPointId, count: u32) -> Vec<QuestDef> {
        (0..count)
            .map(|i| QuestDef::new(point, format!("Quest {i}"), i, DifficultyTier::Beginner))
            .collect()
    }

    fn completed_record(user_id: UserId, quest_id: QuestId) -> UserQuestProgress {
        let mut record =
            UserQuestProgress::started(user_id, quest_id, DialogueId::new(), Utc::now());
        record.mark_completed(Utc::now());
        record
    }

    fn statuses(entries: &[QuestUnlockEntry]) -> Vec<QuestStatus> {
        entries.iter().map(|e| e.status).collect()
    }

    #[test]
    fn first_quest_is_never_locked_by_sequencing() {
        let quests = quest_chain(QuestPointId::new(), 3);
        let entries = evaluate(&quests, &HashMap::new());
        assert_eq!(
            statuses(&entries),
            vec![
                QuestStatus::Available,
                QuestStatus::Locked,
                QuestStatus::Locked
            ]
        );
    }

    #[test]
    fn quest_after_completed_predecessor_is_available() {
        let user_id = UserId::new();
        let quests = quest_chain(QuestPointId::new(), 3);
        let records: HashMap<_, _> = [(quests[0].id, completed_record(user_id, quests[0].id))]
            .into_iter()
            .collect();

        let entries = evaluate(&quests, &records);
        assert_eq!(
            statuses(&entries),
            vec![
                QuestStatus::Completed,
                QuestStatus::Available,
                QuestStatus::Locked
            ]
        );
    }

    #[test]
    fn in_progress_quest_blocks_later_siblings() {
        let user_id = UserId::new();
        let quests = quest_chain(QuestPointId::new(), 3);
        let in_progress =
            UserQuestProgress::started(user_id, quests[0].id, DialogueId::new(), Utc::now());
        let records: HashMap<_, _> = [(quests[0].id, in_progress)].into_iter().collect();

        let entries = evaluate(&quests, &records);
        assert_eq!(
            statuses(&entries),
            vec![
                QuestStatus::InProgress,
                QuestStatus::Locked,
                QuestStatus::Locked
            ]
        );
    }

    #[test]
    fn availability_is_monotonic_across_the_chain() {
        let user_id = UserId::new();
        let quests = quest_chain(QuestPointId::new(), 5);
        let records: HashMap<_, _> = quests[..3]
            .iter()
            .map(|q| (q.id, completed_record(user_id, q.id)))
            .collect();

        let entries = evaluate(&quests, &records);
        assert_eq!(
            statuses(&entries),
            vec![
                QuestStatus::Completed,
                QuestStatus::Completed,
                QuestStatus::Completed,
                QuestStatus::Available,
                QuestStatus::Locked
            ]
        );
    }

    #[tokio::test]
    async fn execute_orders_quests_and_batches_one_lookup() {
        let user_id = UserId::new();
        let point = QuestPointId::new();
        let quests = quest_chain(point, 3);
        let completed = completed_record(user_id, quests[0].id);

        let shuffled = vec![quests[2].clone(), quests[0].clone(), quests[1].clone()];
        let mut quest_repo = MockQuestRepo::new();
        quest_repo
            .expect_list_for_quest_point()
            .returning(move |_| Ok(shuffled.clone()));

        let expected_ids: Vec<QuestId> = quests.iter().map(|q| q.id).collect();
        let expected_for_check = expected_ids.clone();
        let mut progress_repo = MockProgressRepo::new();
        progress_repo
            .expect_list_for_user()
            .withf(move |ids, u| ids == expected_for_check.as_slice() && *u == user_id)
            .times(1)
            .returning(move |_, _| {
                Ok([(completed.quest_id, completed.clone())].into_iter().collect())
            });

        let mut identity = MockSessionIdentityPort::new();
        identity.expect_current_user_id().return_const(Some(user_id));

        let use_case = EvaluateQuestUnlocks::new(
            Arc::new(entities::Quest::new(Arc::new(quest_repo))),
            Arc::new(entities::Progress::new(Arc::new(progress_repo))),
            Arc::new(identity),
        );

        let entries = use_case.execute(point).await.expect("evaluate");
        let ids: Vec<_> = entries.iter().map(|e| e.quest_id).collect();
        assert_eq!(ids, expected_ids);
        assert_eq!(
            statuses(&entries),
            vec![
                QuestStatus::Completed,
                QuestStatus::Available,
                QuestStatus::Locked
            ]
        );
    }

    #[tokio::test]
    async fn execute_degrades_to_sequencing_when_progress_lookup_fails() {
        let user_id = UserId::new();
        let point = QuestPointId::new();
        let quests = quest_chain(point, 2);

        let listed = quests.clone();
        let mut quest_repo = MockQuestRepo::new();
        quest_repo
            .expect_list_for_quest_point()
            .returning(move |_| Ok(listed.clone()));

        let mut progress_repo = MockProgressRepo::new();
        progress_repo
            .expect_list_for_user()
            .returning(|_, _| Err(RepoError::Service("flaky".into())));

        let mut identity = MockSessionIdentityPort::new();
        identity.expect_current_user_id().return_const(Some(user_id));

        let use_case = EvaluateQuestUnlocks::new(
            Arc::new(entities::Quest::new(Arc::new(quest_repo))),
            Arc::new(entities::Progress::new(Arc::new(progress_repo))),
            Arc::new(identity),
        );

        let entries = use_case.execute(point).await.expect("evaluate");
        assert_eq!(
            statuses(&entries),
            vec![QuestStatus::Available, QuestStatus::Locked]
        );
    }

    #[tokio::test]
    async fn execute_fails_when_not_authenticated() {
        let mut identity = MockSessionIdentityPort::new();
        identity.expect_current_user_id().return_const(None);

        let use_case = EvaluateQuestUnlocks::new(
            Arc::new(entities::Quest::new(Arc::new(MockQuestRepo::new()))),
            Arc::new(entities::Progress::new(Arc::new(MockProgressRepo::new()))),
            Arc::new(identity),
        );

        let err = use_case.execute(QuestPointId::new()).await.unwrap_err();
        assert!(matches!(err, UnlockError::NotAuthenticated));
    }
}

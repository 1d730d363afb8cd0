//! User quest progress - the durable per-(user, quest) record.
//!
//! Exactly one record exists per (user, quest) once a quest has been started;
//! its `last_dialogue_id` is the single source of truth for resumption.
//! Records are created on quest start, updated on every answer submission
//! and on completion, and never deleted by this subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::{DialogueId, ProgressId, QuestId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuestProgress {
    pub id: ProgressId,
    pub user_id: UserId,
    pub quest_id: QuestId,
    pub status: ProgressStatus,
    pub xp_earned: u32,
    pub score: u32,
    /// 0.0..=100.0, maintained by the content service.
    pub percent_complete: f32,
    /// Resumption point: the last dialogue node presented to the user.
    pub last_dialogue_id: Option<DialogueId>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl UserQuestProgress {
    /// New in-progress record seeded at the quest's entry node.
    pub fn started(
        user_id: UserId,
        quest_id: QuestId,
        first_dialogue_id: DialogueId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProgressId::new(),
            user_id,
            quest_id,
            status: ProgressStatus::InProgress,
            xp_earned: 0,
            score: 0,
            percent_complete: 0.0,
            last_dialogue_id: Some(first_dialogue_id),
            started_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }

    /// Marks the record completed. Idempotent: a second call leaves the
    /// record unchanged, including `completed_at`.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        if self.is_completed() {
            return;
        }
        self.status = ProgressStatus::Completed;
        self.percent_complete = 100.0;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    /// Records an advance to a new dialogue node after a successful
    /// submission.
    pub fn record_advance(&mut self, dialogue_id: DialogueId, now: DateTime<Utc>) {
        self.last_dialogue_id = Some(dialogue_id);
        self.updated_at = now;
    }
}

/// Lifecycle status of a progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::parse(format!(
                "Unknown progress status: {other}"
            ))),
        }
    }
}

//! Quest availability status - the unlock evaluator's per-quest verdict.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ProgressStatus;

/// Computed availability of one quest within its quest-point sequence.
///
/// `InProgress` and `Completed` mirror the stored progress record;
/// `Available` and `Locked` are derived from sibling sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Locked,
    Available,
    InProgress,
    Completed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Available => "available",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Whether the user may enter the quest right now.
    pub fn is_enterable(&self) -> bool {
        matches!(self, Self::Available | Self::InProgress)
    }
}

impl From<ProgressStatus> for QuestStatus {
    fn from(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::NotStarted => Self::Available,
            ProgressStatus::InProgress => Self::InProgress,
            ProgressStatus::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locked" => Ok(Self::Locked),
            "available" => Ok(Self::Available),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::parse(format!("Unknown quest status: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterable_statuses() {
        assert!(QuestStatus::Available.is_enterable());
        assert!(QuestStatus::InProgress.is_enterable());
        assert!(!QuestStatus::Locked.is_enterable());
        assert!(!QuestStatus::Completed.is_enterable());
    }

    #[test]
    fn test_from_progress_status() {
        assert_eq!(
            QuestStatus::from(ProgressStatus::InProgress),
            QuestStatus::InProgress
        );
        assert_eq!(
            QuestStatus::from(ProgressStatus::Completed),
            QuestStatus::Completed
        );
    }

    #[test]
    fn test_round_trip_through_str() {
        for status in [
            QuestStatus::Locked,
            QuestStatus::Available,
            QuestStatus::InProgress,
            QuestStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<QuestStatus>().ok(), Some(status));
        }
    }
}

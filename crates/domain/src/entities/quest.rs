//! Quest entity - one completable unit of narrative content.
//!
//! A quest belongs to a quest-point, occupies an ordered position among its
//! siblings, and is backed by a dialogue graph entered at `first_dialogue_id`.
//! Quest definitions are authored server-side and read-only to the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::{DialogueId, QuestId, QuestPointId};

/// Immutable quest definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub quest_point_id: QuestPointId,
    pub title: String,
    pub description: String,
    /// Position among siblings within the quest-point. Ties are broken by id.
    pub order_index: u32,
    pub difficulty: DifficultyTier,
    /// XP awarded when the quest is completed.
    pub xp_reward: u32,
    /// Entry node of the dialogue graph. A quest without one cannot be started.
    pub first_dialogue_id: Option<DialogueId>,
    /// Declarative gate evaluated by the preview/unlock flow, independent of
    /// sibling sequencing.
    #[serde(default)]
    pub unlock_requirement: Option<UnlockRequirement>,
}

impl Quest {
    pub fn new(
        quest_point_id: QuestPointId,
        title: impl Into<String>,
        order_index: u32,
        difficulty: DifficultyTier,
    ) -> Self {
        Self {
            id: QuestId::new(),
            quest_point_id,
            title: title.into(),
            description: String::new(),
            order_index,
            difficulty,
            xp_reward: 0,
            first_dialogue_id: None,
            unlock_requirement: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_first_dialogue(mut self, dialogue_id: DialogueId) -> Self {
        self.first_dialogue_id = Some(dialogue_id);
        self
    }

    pub fn with_xp_reward(mut self, xp: u32) -> Self {
        self.xp_reward = xp;
        self
    }

    pub fn with_unlock_requirement(mut self, requirement: UnlockRequirement) -> Self {
        self.unlock_requirement = Some(requirement);
        self
    }

    /// Deterministic ordering key for sibling quests: `order_index`, ties
    /// broken by id.
    pub fn sequence_key(&self) -> (u32, QuestId) {
        (self.order_index, self.id)
    }
}

/// Quest difficulty tier shown to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(DomainError::parse(format!(
                "Unknown difficulty tier: {other}"
            ))),
        }
    }
}

/// CEFR language-proficiency tier used in unlock requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProficiencyTier {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl ProficiencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

impl fmt::Display for ProficiencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProficiencyTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "B1" => Ok(Self::B1),
            "B2" => Ok(Self::B2),
            "C1" => Ok(Self::C1),
            "C2" => Ok(Self::C2),
            other => Err(DomainError::parse(format!(
                "Unknown proficiency tier: {other}"
            ))),
        }
    }
}

/// Declarative unlock gate, independent of sibling sequencing.
///
/// Evaluated by the quest preview flow before entry; the progression
/// engine itself only sequences by `order_index`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequirement {
    #[serde(default)]
    pub requires_premium: bool,
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub min_proficiency: Option<ProficiencyTier>,
    #[serde(default)]
    pub prerequisite_quests: Vec<QuestId>,
}

impl UnlockRequirement {
    /// Checks the gate against a user's account state.
    ///
    /// `completed_quests` must contain every quest the user has completed
    /// (across quest-points, since prerequisites may cross them).
    pub fn is_met(
        &self,
        has_premium: bool,
        level: u32,
        proficiency: Option<ProficiencyTier>,
        completed_quests: &[QuestId],
    ) -> bool {
        if self.requires_premium && !has_premium {
            return false;
        }
        if let Some(min) = self.min_level {
            if level < min {
                return false;
            }
        }
        if let Some(min) = self.min_proficiency {
            match proficiency {
                Some(tier) if tier >= min => {}
                _ => return false,
            }
        }
        self.prerequisite_quests
            .iter()
            .all(|q| completed_quests.contains(q))
    }
}

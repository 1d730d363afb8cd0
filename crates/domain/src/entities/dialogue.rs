//! Dialogue node entity - one scene of a quest's narrative graph.
//!
//! The nodes of one quest form a directed graph. A node either branches
//! through its choices, falls through to `next_dialogue_id`, or terminates
//! the graph when it has neither. The engine treats a missing next id as the
//! deliberate termination signal, not an error; a dangling reference is a
//! content defect surfaced at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::{DialogueId, SpeakerId};

/// Immutable scene definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNode {
    pub id: DialogueId,
    /// Display text of the scene (narration or the speaker's line).
    pub text: String,
    #[serde(default)]
    pub speaker_id: Option<SpeakerId>,
    /// Whether advancing past this node consumes an answer.
    #[serde(default)]
    pub expects_response: bool,
    #[serde(default)]
    pub input_mode: InputMode,
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Fallback successor: used when there is no choice branching, or after
    /// a correct free-text answer with no server override.
    #[serde(default)]
    pub next_dialogue_id: Option<DialogueId>,
}

impl DialogueNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: DialogueId::new(),
            text: text.into(),
            speaker_id: None,
            expects_response: false,
            input_mode: InputMode::None,
            choices: Vec::new(),
            next_dialogue_id: None,
        }
    }

    pub fn with_speaker(mut self, speaker_id: SpeakerId) -> Self {
        self.speaker_id = Some(speaker_id);
        self
    }

    pub fn with_next(mut self, next: DialogueId) -> Self {
        self.next_dialogue_id = Some(next);
        self
    }

    pub fn expecting_free_text(mut self) -> Self {
        self.expects_response = true;
        self.input_mode = InputMode::FreeText;
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.expects_response = true;
        self.input_mode = InputMode::MultipleChoice;
        self.choices = choices;
        self
    }

    /// A pure narrative beat: advancing consumes no answer.
    pub fn is_narrative(&self) -> bool {
        !self.expects_response && self.input_mode == InputMode::None
    }

    /// Terminal node: no successor and no choices. Reaching one completes
    /// the quest.
    pub fn is_terminal(&self) -> bool {
        self.next_dialogue_id.is_none() && self.choices.is_empty()
    }
}

/// How the user responds to a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    FreeText,
    MultipleChoice,
    /// No input; the scene is advanced with a plain "continue".
    #[default]
    None,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreeText => "free_text",
            Self::MultipleChoice => "multiple_choice",
            Self::None => "none",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free_text" => Ok(Self::FreeText),
            "multiple_choice" => Ok(Self::MultipleChoice),
            "none" => Ok(Self::None),
            other => Err(DomainError::parse(format!("Unknown input mode: {other}"))),
        }
    }
}

/// One selectable answer on a multiple-choice node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    /// Branch target. Falls back to the node's own `next_dialogue_id`
    /// when absent.
    #[serde(default)]
    pub next_dialogue_id: Option<DialogueId>,
}

impl Choice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_dialogue_id: None,
        }
    }

    pub fn leading_to(text: impl Into<String>, next: DialogueId) -> Self {
        Self {
            text: text.into(),
            next_dialogue_id: Some(next),
        }
    }
}

/// Display data for a scene's speaker, resolved lazily; a scene is usable
/// without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    #[serde(default)]
    pub portrait_asset: Option<String>,
}

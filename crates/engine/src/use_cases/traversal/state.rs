//! Traversal state machine states.
//!
//! One closed set of states with associated data per variant:
//!
//! `Idle -> Loading -> Presenting -> Submitting -> Feedback -> Presenting | Completed`
//!
//! `Completed` is terminal for the session attempt. `Feedback` returns to
//! `Presenting` on the same node after an incorrect answer so the user may
//! retry. `AdvancePending` interposes when the step to the next scene (or to
//! completion) fails transiently: the departing node stays current until
//! `retry_advance` succeeds.

use lingotrail_domain::{DialogueId, DialogueNode, SessionSummary, Speaker};

/// Current state of one quest traversal attempt.
#[derive(Debug, Clone)]
pub enum TraversalState {
    /// No quest entered yet.
    Idle,
    /// Fetching the quest, progress record, or a scene.
    Loading,
    /// A scene is on screen, awaiting input (or a plain continue).
    Presenting {
        node: DialogueNode,
        /// Resolved lazily; the scene is usable while this is `None`.
        speaker: Option<Speaker>,
    },
    /// An answer is in flight. Further submissions are rejected.
    Submitting { node: DialogueNode },
    /// Correctness feedback is on screen for a fixed display interval.
    Feedback { node: DialogueNode, correct: bool },
    /// A step to the next scene (or to completion) hit a service failure.
    /// The departing node stays current; `retry_advance` re-runs the step.
    AdvancePending {
        node: DialogueNode,
        /// Resolved target of the step. `None` means quest completion.
        next: Option<DialogueId>,
    },
    /// The graph terminated; final session statistics are exposed.
    Completed { summary: SessionSummary },
}

impl TraversalState {
    /// The node currently owned by the state machine, if any.
    pub fn current_node(&self) -> Option<&DialogueNode> {
        match self {
            Self::Presenting { node, .. }
            | Self::Submitting { node }
            | Self::Feedback { node, .. }
            | Self::AdvancePending { node, .. } => Some(node),
            Self::Idle | Self::Loading | Self::Completed { .. } => None,
        }
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self, Self::Presenting { .. })
    }

    pub fn is_advance_pending(&self) -> bool {
        matches!(self, Self::AdvancePending { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_node_only_in_scene_states() {
        assert!(TraversalState::Idle.current_node().is_none());
        assert!(TraversalState::Loading.current_node().is_none());

        let node = DialogueNode::new("hello");
        let state = TraversalState::Presenting {
            node: node.clone(),
            speaker: None,
        };
        assert_eq!(state.current_node().map(|n| n.id), Some(node.id));

        let stalled = TraversalState::AdvancePending {
            node: node.clone(),
            next: None,
        };
        assert_eq!(stalled.current_node().map(|n| n.id), Some(node.id));
        assert!(stalled.is_advance_pending());
    }

    #[test]
    fn test_completed_is_terminal_marker() {
        let state = TraversalState::Completed {
            summary: lingotrail_domain::SessionStats::new().snapshot(),
        };
        assert!(state.is_completed());
        assert!(!state.is_presenting());
    }
}

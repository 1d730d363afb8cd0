//! Dialogue graph traversal use case.
//!
//! Owns one quest attempt: walks the directed graph of dialogue nodes
//! scene-by-scene, grades answers through the content service, accumulates
//! session statistics, and completes the quest when the graph terminates.
//!
//! One instance per attempt. Nothing here survives the attempt: abandoning
//! the traversal mid-scene simply drops it, and the server-side progress
//! record (updated on successful submissions) is the durable resumption
//! point for the next attempt.

mod state;

pub use state::TraversalState;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use lingotrail_domain::{
    DialogueId, DialogueNode, InputMode, QuestId, SessionStats, Speaker, UserQuestProgress,
};

use crate::entities::{Dialogue, Progress, Quest};
use crate::infrastructure::ports::{ClockPort, RepoError, SessionIdentityPort};

/// How long correctness feedback stays on screen before the graph advances.
/// Display pacing only, not a retry or backoff interval.
pub const FEEDBACK_DISPLAY_DELAY: Duration = Duration::from_millis(900);

/// Quest traversal engine.
///
/// All operations take `&mut self` and are driven one at a time by the
/// presentation layer; submissions are additionally rejected unless a scene
/// is currently presented, so at most one is in flight.
pub struct QuestTraversal {
    quest: Arc<Quest>,
    dialogue: Arc<Dialogue>,
    progress: Arc<Progress>,
    identity: Arc<dyn SessionIdentityPort>,
    clock: Arc<dyn ClockPort>,
    feedback_delay: Duration,
    state: TraversalState,
    stats: SessionStats,
    /// Local mirror of the durable progress record for the active attempt.
    attempt: Option<UserQuestProgress>,
}

impl QuestTraversal {
    pub fn new(
        quest: Arc<Quest>,
        dialogue: Arc<Dialogue>,
        progress: Arc<Progress>,
        identity: Arc<dyn SessionIdentityPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            quest,
            dialogue,
            progress,
            identity,
            clock,
            feedback_delay: FEEDBACK_DISPLAY_DELAY,
            state: TraversalState::Idle,
            stats: SessionStats::new(),
            attempt: None,
        }
    }

    /// Override the feedback display delay (for testing).
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.state.current_node()
    }

    pub fn attempt(&self) -> Option<&UserQuestProgress> {
        self.attempt.as_ref()
    }

    /// Enters a quest: fetches (or creates) the user's progress record and
    /// presents the resumption scene, or the quest's entry scene for a
    /// fresh start. Resets session statistics.
    pub async fn start(&mut self, quest_id: QuestId) -> Result<(), TraversalError> {
        let user_id = self
            .identity
            .current_user_id()
            .ok_or(TraversalError::NotAuthenticated)?;

        self.state = TraversalState::Loading;
        self.attempt = None;
        self.stats.reset();

        let quest = match self.quest.get(quest_id).await {
            Ok(Some(q)) => q,
            Ok(None) => {
                self.state = TraversalState::Idle;
                return Err(TraversalError::content_unavailable("Quest", quest_id));
            }
            Err(e) => {
                self.state = TraversalState::Idle;
                return Err(map_repo("Quest", quest_id.to_string(), e));
            }
        };

        // A quest must always have an entry node.
        let first = match quest.first_dialogue_id {
            Some(id) => id,
            None => {
                self.state = TraversalState::Idle;
                return Err(TraversalError::content_unavailable(
                    "Quest entry node",
                    quest_id,
                ));
            }
        };

        let record = match self.progress.get_or_create(user_id, quest_id).await {
            Ok(r) => r,
            Err(e) => {
                self.state = TraversalState::Idle;
                return Err(map_repo("UserQuestProgress", quest_id.to_string(), e));
            }
        };

        let resume_at = record.last_dialogue_id.unwrap_or(first);
        self.attempt = Some(record);
        self.load_scene(resume_at).await
    }

    /// Fetches a node and presents it. A dangling id is a content defect
    /// surfaced as `ContentUnavailable`, never retried here.
    pub async fn load_scene(&mut self, dialogue_id: DialogueId) -> Result<(), TraversalError> {
        self.state = TraversalState::Loading;

        let node = match self.dialogue.get(dialogue_id).await {
            Ok(Some(n)) => n,
            Ok(None) => {
                return Err(TraversalError::content_unavailable(
                    "DialogueNode",
                    dialogue_id,
                ))
            }
            Err(e) => return Err(map_repo("DialogueNode", dialogue_id.to_string(), e)),
        };

        if let Some(attempt) = self.attempt.as_mut() {
            attempt.record_advance(node.id, self.clock.now());
        }

        self.state = TraversalState::Presenting {
            node,
            speaker: None,
        };
        Ok(())
    }

    /// Resolves the presented scene's speaker display data after the scene
    /// is already on screen. Failures are logged and ignored: the scene is
    /// usable without speaker data.
    pub async fn resolve_speaker(&mut self) {
        let speaker_id = match &self.state {
            TraversalState::Presenting {
                node,
                speaker: None,
            } => match node.speaker_id {
                Some(id) => id,
                None => return,
            },
            _ => return,
        };

        match self.dialogue.get_speaker(speaker_id).await {
            Ok(found) => {
                if let TraversalState::Presenting { speaker, .. } = &mut self.state {
                    *speaker = found;
                }
            }
            Err(e) => {
                tracing::warn!(
                    speaker_id = %speaker_id,
                    error = %e,
                    "Speaker lookup failed; presenting scene without speaker data"
                );
            }
        }
    }

    /// Submits a free-text answer for the presented scene.
    ///
    /// Returns the correctness verdict. A correct answer advances the graph
    /// after the feedback interval; an incorrect one returns to the same
    /// scene for retry. On a service failure the scene is left unchanged so
    /// the caller can retry the same submission (the typed answer is never
    /// discarded by the engine).
    pub async fn submit_answer(&mut self, answer: &str) -> Result<bool, TraversalError> {
        let (node, speaker) = self.take_presenting("submit_answer")?;

        if !(node.expects_response && node.input_mode == InputMode::FreeText) {
            self.state = TraversalState::Presenting { node, speaker };
            return Err(TraversalError::NotAwaitingInput(
                "submit_answer on a node without free-text input",
            ));
        }

        let fallback_next = node.next_dialogue_id;
        self.grade(node, speaker, answer.to_string(), fallback_next)
            .await
    }

    /// Submits one of the presented scene's choices.
    ///
    /// The next node is the server's resolved override when present, else
    /// the choice's own target, else the node's fallback successor.
    pub async fn select_choice(&mut self, index: usize) -> Result<bool, TraversalError> {
        let (node, speaker) = self.take_presenting("select_choice")?;

        if node.input_mode != InputMode::MultipleChoice {
            self.state = TraversalState::Presenting { node, speaker };
            return Err(TraversalError::NotAwaitingInput(
                "select_choice on a node without choices",
            ));
        }

        let choice = match node.choices.get(index) {
            Some(c) => c.clone(),
            None => {
                self.state = TraversalState::Presenting { node, speaker };
                return Err(TraversalError::InvalidChoice(index));
            }
        };

        let fallback_next = choice.next_dialogue_id.or(node.next_dialogue_id);
        self.grade(node, speaker, choice.text, fallback_next).await
    }

    /// Advances a pure narrative scene. No answer is submitted and no
    /// statistics are recorded.
    pub async fn continue_scene(&mut self) -> Result<(), TraversalError> {
        let (node, speaker) = self.take_presenting("continue_scene")?;

        if !node.is_narrative() {
            self.state = TraversalState::Presenting { node, speaker };
            return Err(TraversalError::NotAwaitingInput(
                "continue_scene on a node that expects input",
            ));
        }

        let next = node.next_dialogue_id;
        self.advance(node, next).await
    }

    /// Retries a step that previously failed with a service error, loading
    /// the same resolved target (or completing the quest) again.
    pub async fn retry_advance(&mut self) -> Result<(), TraversalError> {
        match std::mem::replace(&mut self.state, TraversalState::Loading) {
            TraversalState::AdvancePending { node, next } => self.advance(node, next).await,
            other => {
                self.state = other;
                Err(TraversalError::NotAwaitingInput(
                    "retry_advance without a pending advance",
                ))
            }
        }
    }

    /// Advance resolution rule, shared by submit and continue: no next id
    /// is the graph's termination signal; otherwise load that node. A
    /// service failure keeps the departing node current so the step can be
    /// retried; a dangling id cannot be retried and is surfaced as-is.
    async fn advance(
        &mut self,
        node: DialogueNode,
        next: Option<DialogueId>,
    ) -> Result<(), TraversalError> {
        let result = match next {
            Some(id) => self.load_scene(id).await,
            None => self.complete_quest().await,
        };
        if let Err(TraversalError::TransientService(_)) = &result {
            self.state = TraversalState::AdvancePending { node, next };
        }
        result
    }

    /// Single exit point of the state machine. Marks the durable record
    /// completed (idempotent on the content service) and exposes the final
    /// session statistics.
    async fn complete_quest(&mut self) -> Result<(), TraversalError> {
        if self.state.is_completed() {
            return Ok(());
        }

        let progress_id = match &self.attempt {
            Some(a) => a.id,
            None => {
                return Err(TraversalError::NotAwaitingInput(
                    "complete_quest without an active attempt",
                ))
            }
        };

        match self.progress.mark_completed(progress_id).await {
            Ok(record) => {
                let summary = self.stats.snapshot();
                tracing::info!(
                    quest_id = %record.quest_id,
                    correct = summary.correct,
                    total = summary.total,
                    xp_earned = summary.xp_earned,
                    "Quest completed"
                );
                self.attempt = Some(record);
                self.state = TraversalState::Completed { summary };
                Ok(())
            }
            // `advance` keeps the terminal scene current so the completion
            // call can be retried in-session.
            Err(e) => Err(map_repo("UserQuestProgress", progress_id.to_string(), e)),
        }
    }

    /// Grades one answer through the content service and applies the
    /// verdict to stats and state.
    async fn grade(
        &mut self,
        node: DialogueNode,
        speaker: Option<Speaker>,
        answer: String,
        fallback_next: Option<DialogueId>,
    ) -> Result<bool, TraversalError> {
        let progress_id = match &self.attempt {
            Some(a) => a.id,
            None => {
                self.state = TraversalState::Presenting { node, speaker };
                return Err(TraversalError::NotAwaitingInput(
                    "answer submitted without an active attempt",
                ));
            }
        };

        self.state = TraversalState::Submitting { node: node.clone() };

        let verdict = match self.progress.submit_answer(progress_id, node.id, &answer).await {
            Ok(v) => v,
            Err(e) => {
                let err = map_repo("Answer", node.id.to_string(), e);
                self.state = TraversalState::Presenting { node, speaker };
                return Err(err);
            }
        };

        self.stats.record_answer(verdict.correct);
        self.state = TraversalState::Feedback {
            node: node.clone(),
            correct: verdict.correct,
        };
        sleep(self.feedback_delay).await;

        if verdict.correct {
            let next = verdict.resolved_next_dialogue_id.or(fallback_next);
            self.advance(node, next).await?;
            Ok(true)
        } else {
            // Same node stays current so the user may retry.
            self.state = TraversalState::Presenting { node, speaker };
            Ok(false)
        }
    }

    /// Takes the presented scene out of the state machine, or rejects the
    /// operation when no scene is awaiting input.
    fn take_presenting(
        &mut self,
        op: &'static str,
    ) -> Result<(DialogueNode, Option<Speaker>), TraversalError> {
        match std::mem::replace(&mut self.state, TraversalState::Loading) {
            TraversalState::Presenting { node, speaker } => Ok((node, speaker)),
            other => {
                self.state = other;
                Err(TraversalError::NotAwaitingInput(op))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    /// No user id is available. Fatal to starting a quest; must be resolved
    /// before retry.
    #[error("No authenticated user")]
    NotAuthenticated,
    /// A quest or dialogue id did not resolve. Treated as a
    /// content-authoring defect and surfaced verbatim.
    #[error("Content unavailable: {entity} {id}")]
    ContentUnavailable { entity: &'static str, id: String },
    /// Network/service failure. The engine's state is unchanged; retrying
    /// the same operation is safe.
    #[error("Service failure: {0}")]
    TransientService(String),
    /// The operation is not valid in the current traversal state.
    #[error("Input not accepted: {0}")]
    NotAwaitingInput(&'static str),
    #[error("No choice at index {0}")]
    InvalidChoice(usize),
}

impl TraversalError {
    fn content_unavailable(entity: &'static str, id: impl ToString) -> Self {
        Self::ContentUnavailable {
            entity,
            id: id.to_string(),
        }
    }
}

fn map_repo(entity: &'static str, id: String, err: RepoError) -> TraversalError {
    match err {
        RepoError::NotFound => TraversalError::ContentUnavailable { entity, id },
        RepoError::Service(msg) => TraversalError::TransientService(msg),
        // A malformed payload is a content defect, not a transient fault.
        RepoError::Serialization(msg) => TraversalError::ContentUnavailable {
            entity,
            id: format!("{id} ({msg})"),
        },
    }
}

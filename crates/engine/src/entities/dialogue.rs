//! Dialogue entity operations.

use std::sync::Arc;

use lingotrail_domain::{DialogueId, DialogueNode, Speaker, SpeakerId};

use crate::infrastructure::ports::{DialogueRepo, RepoError};

/// Dialogue entity operations.
pub struct Dialogue {
    repo: Arc<dyn DialogueRepo>,
}

impl Dialogue {
    pub fn new(repo: Arc<dyn DialogueRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: DialogueId) -> Result<Option<DialogueNode>, RepoError> {
        self.repo.get(id).await
    }

    pub async fn get_speaker(&self, id: SpeakerId) -> Result<Option<Speaker>, RepoError> {
        self.repo.get_speaker(id).await
    }
}

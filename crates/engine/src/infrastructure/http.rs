//! REST client for the remote content/persistence service.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use lingotrail_domain::{
    DialogueId, DialogueNode, ProgressId, Quest, QuestId, QuestPointId, Speaker, SpeakerId, UserId,
    UserQuestProgress,
};

use crate::infrastructure::ports::{
    AnswerVerdict, DialogueRepo, ProgressRepo, QuestRepo, RepoError,
};

/// Default base URL of the content service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Client for the LingoTrail content service REST API.
#[derive(Clone)]
pub struct ContentApiClient {
    client: Client,
    base_url: String,
}

impl ContentApiClient {
    pub fn new(base_url: &str) -> Self {
        // Mobile networks are slow; keep a generous request timeout.
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create client with custom timeout (for testing).
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create client from the `LINGOTRAIL_API_BASE_URL` environment
    /// variable, falling back to the default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("LINGOTRAIL_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::new(&base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a response body, mapping non-2xx statuses to `RepoError`.
    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RepoError> {
        let response = check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| RepoError::Serialization(e.to_string()))
    }

    /// Like `decode`, but maps a 404 to `Ok(None)` for lookup endpoints.
    async fn decode_optional<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<Option<T>, RepoError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::decode(response).await?))
    }
}

fn check_status(response: Response) -> Result<Response, RepoError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(RepoError::NotFound);
    }
    if !status.is_success() {
        return Err(RepoError::Service(format!(
            "content service returned {status}"
        )));
    }
    Ok(response)
}

fn transport_error(e: reqwest::Error) -> RepoError {
    RepoError::Service(e.to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitAnswerRequest<'a> {
    dialogue_id: DialogueId,
    answer: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitAnswerResponse {
    correct: bool,
    #[serde(default)]
    resolved_next_dialogue_id: Option<DialogueId>,
}

#[async_trait]
impl QuestRepo for ContentApiClient {
    async fn get(&self, id: QuestId) -> Result<Option<Quest>, RepoError> {
        let response = self
            .client
            .get(self.url(&format!("/quests/{id}")))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode_optional(response).await
    }

    async fn list_for_quest_point(
        &self,
        quest_point_id: QuestPointId,
    ) -> Result<Vec<Quest>, RepoError> {
        let response = self
            .client
            .get(self.url(&format!("/quest-points/{quest_point_id}/quests")))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }
}

#[async_trait]
impl DialogueRepo for ContentApiClient {
    async fn get(&self, id: DialogueId) -> Result<Option<DialogueNode>, RepoError> {
        let response = self
            .client
            .get(self.url(&format!("/dialogues/{id}")))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode_optional(response).await
    }

    async fn get_speaker(&self, id: SpeakerId) -> Result<Option<Speaker>, RepoError> {
        let response = self
            .client
            .get(self.url(&format!("/speakers/{id}")))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode_optional(response).await
    }
}

#[async_trait]
impl ProgressRepo for ContentApiClient {
    async fn get_or_create(
        &self,
        user_id: UserId,
        quest_id: QuestId,
    ) -> Result<UserQuestProgress, RepoError> {
        // PUT is the service's get-or-create: it returns the existing record
        // or creates one seeded at the quest's first dialogue node.
        let response = self
            .client
            .put(self.url(&format!("/users/{user_id}/quests/{quest_id}/progress")))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    async fn submit_answer(
        &self,
        progress_id: ProgressId,
        dialogue_id: DialogueId,
        answer: &str,
    ) -> Result<AnswerVerdict, RepoError> {
        let body = SubmitAnswerRequest {
            dialogue_id,
            answer,
        };
        let response = self
            .client
            .post(self.url(&format!("/progress/{progress_id}/answers")))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let verdict: SubmitAnswerResponse = Self::decode(response).await?;
        Ok(AnswerVerdict {
            correct: verdict.correct,
            resolved_next_dialogue_id: verdict.resolved_next_dialogue_id,
        })
    }

    async fn mark_completed(
        &self,
        progress_id: ProgressId,
    ) -> Result<UserQuestProgress, RepoError> {
        let response = self
            .client
            .post(self.url(&format!("/progress/{progress_id}/complete")))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    async fn list_for_user(
        &self,
        quest_ids: &[QuestId],
        user_id: UserId,
    ) -> Result<HashMap<QuestId, UserQuestProgress>, RepoError> {
        let ids = quest_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let response = self
            .client
            .get(self.url(&format!("/users/{user_id}/progress")))
            .query(&[("questIds", ids)])
            .send()
            .await
            .map_err(transport_error)?;
        let records: Vec<UserQuestProgress> = Self::decode(response).await?;
        Ok(records.into_iter().map(|p| (p.quest_id, p)).collect())
    }
}

//! Walks the first enterable quest of a quest-point against a running
//! content service, auto-continuing through narrative beats.
//!
//! Requires `LINGOTRAIL_QUEST_POINT_ID` and `LINGOTRAIL_USER_ID` (UUIDs) and
//! optionally `LINGOTRAIL_API_BASE_URL`.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingotrail_domain::{QuestPointId, SessionSummary, UserId};
use lingotrail_engine::entities::{Dialogue, Progress, Quest};
use lingotrail_engine::infrastructure::clock::SystemClock;
use lingotrail_engine::infrastructure::http::ContentApiClient;
use lingotrail_engine::infrastructure::identity::SessionIdentity;
use lingotrail_engine::{EvaluateQuestUnlocks, QuestTraversal, TraversalState};

enum Step {
    Continue(String),
    AwaitInput(String),
    Done(SessionSummary),
    Other,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lingotrail_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let quest_point = QuestPointId::from_uuid(
        std::env::var("LINGOTRAIL_QUEST_POINT_ID")?.parse::<uuid::Uuid>()?,
    );
    let user = UserId::from_uuid(std::env::var("LINGOTRAIL_USER_ID")?.parse::<uuid::Uuid>()?);

    let api = Arc::new(ContentApiClient::from_env());
    let quests = Arc::new(Quest::new(api.clone()));
    let dialogue = Arc::new(Dialogue::new(api.clone()));
    let progress = Arc::new(Progress::new(api.clone()));
    let identity = Arc::new(SessionIdentity::signed_in(user));

    let unlocks = EvaluateQuestUnlocks::new(quests.clone(), progress.clone(), identity.clone());
    let entries = unlocks.execute(quest_point).await?;
    for entry in &entries {
        tracing::info!(quest_id = %entry.quest_id, status = %entry.status, "quest status");
    }

    let Some(enterable) = entries.iter().find(|e| e.status.is_enterable()) else {
        tracing::info!("No enterable quest at this quest-point");
        return Ok(());
    };

    let mut traversal = QuestTraversal::new(
        quests,
        dialogue,
        progress,
        identity,
        Arc::new(SystemClock),
    );
    traversal.start(enterable.quest_id).await?;
    traversal.resolve_speaker().await;

    loop {
        let step = match traversal.state() {
            TraversalState::Presenting { node, .. } if node.is_narrative() => {
                Step::Continue(node.text.clone())
            }
            TraversalState::Presenting { node, .. } => Step::AwaitInput(node.text.clone()),
            TraversalState::Completed { summary } => Step::Done(*summary),
            _ => Step::Other,
        };

        match step {
            Step::Continue(text) => {
                println!("{text}");
                traversal.continue_scene().await?;
                traversal.resolve_speaker().await;
            }
            Step::AwaitInput(text) => {
                println!("(awaiting input) {text}");
                break;
            }
            Step::Done(summary) => {
                println!(
                    "Quest complete: {}/{} correct, {} XP",
                    summary.correct, summary.total, summary.xp_earned
                );
                break;
            }
            Step::Other => break,
        }
    }

    Ok(())
}

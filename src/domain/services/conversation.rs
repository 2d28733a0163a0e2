#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use super::Assistant;
use super::PlanRequestBuilder;
use crate::domain::models::BackendPrompt;
use crate::domain::models::PlanDocument;
use crate::domain::models::PlanError;
use crate::domain::models::ProfileData;
use crate::domain::models::Transcript;
use crate::domain::models::Turn;

/// Per-session context for the guided chat. Owns the transcript and the
/// plan-ready flag; every handler receives it explicitly.
pub struct ConversationDriver {
    id: String,
    assistant: Arc<Assistant>,
    planner: PlanRequestBuilder,
    transcript: Transcript,
    plan_ready: bool,
}

impl ConversationDriver {
    pub fn new(assistant: Arc<Assistant>) -> ConversationDriver {
        return ConversationDriver {
            id: ConversationDriver::create_id(),
            planner: PlanRequestBuilder::new(assistant.clone()),
            assistant,
            transcript: Transcript::default(),
            plan_ready: false,
        };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");
    }

    pub fn id(&self) -> &str {
        return &self.id;
    }

    pub fn transcript(&self) -> &Transcript {
        return &self.transcript;
    }

    pub fn is_plan_ready(&self) -> bool {
        return self.plan_ready;
    }

    /// Handles one student message and returns the reply to display.
    ///
    /// The student turn is appended before the backend is called and stays in
    /// the transcript even when the call fails. Replies containing the
    /// completion phrase flag the session as plan-ready and are not kept, the
    /// final plan is generated separately by [`ConversationDriver::finalize`].
    pub async fn turn(&mut self, user_text: &str) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(PlanError::EmptyMessage.into());
        }

        self.transcript.push(Turn::user(user_text));

        let prompt = BackendPrompt::new(self.transcript.turns().to_vec())
            .with_instruction(&self.assistant.tool_reminder());
        let reply = self.assistant.complete(prompt).await?;
        let reply = self.assistant.resolve_search(reply).await?;

        if self.assistant.classifier().is_plan_ready(&reply) {
            tracing::debug!(session = %self.id, "Conversation is ready for a plan");
            self.plan_ready = true;
        } else {
            self.transcript.push(Turn::assistant(&reply));
        }

        return Ok(reply);
    }

    pub fn profile(&self) -> ProfileData {
        return ProfileData::from_transcript(&self.transcript);
    }

    /// Generates the final plan from everything gathered so far, then starts
    /// the session over. A failed generation leaves the session untouched so
    /// it can be retried.
    pub async fn finalize(&mut self) -> Result<PlanDocument> {
        let plan = self.planner.build_plan(&self.profile()).await?;
        tracing::info!(session = %self.id, "Generated study plan");
        self.clear();

        return Ok(plan);
    }

    pub fn clear(&mut self) {
        self.transcript.reset();
        self.plan_ready = false;
        self.id = ConversationDriver::create_id();
    }
}

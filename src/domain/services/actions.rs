#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ConversationDriver;
use super::PlanFiles;
use crate::domain::models::Action;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /plan (/p) - Generate your study plan now with everything shared so far, then start over.
- /clear (/c) - Clear the chat history and start a new plan.
- /quit /exit (/q) - Exit the study planner.
- /help (/h) - Provides this help menu.

The assistant asks one question at a time about your subject, goals, daily study time, skill level, and learning style. Once it has everything it needs, your plan is generated and saved automatically.
        "#;

    return text.trim().to_string();
}

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tracing::error!(error = ?err, "Action failed");
    tx.send(Event::WorkerError(format!("{err}")))?;

    return Ok(());
}

fn history(driver: &ConversationDriver, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::HistoryCleared(
        driver.transcript().visible_turns().to_vec(),
    ))?;

    return Ok(());
}

async fn finalize_plan(
    driver: &mut ConversationDriver,
    plan_files: &PlanFiles,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let plan = match driver.finalize().await {
        Ok(plan) => plan,
        Err(err) => return worker_error(err, tx),
    };

    match plan_files.save(&plan).await {
        Ok(file_path) => tx.send(Event::PlanGenerated(plan, file_path))?,
        Err(err) => worker_error(err, tx)?,
    }

    return history(driver, tx);
}

async fn chat_turn(
    driver: &mut ConversationDriver,
    plan_files: &PlanFiles,
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<()> {
    let reply = match driver.turn(text).await {
        Ok(reply) => reply,
        Err(err) => return worker_error(err, tx),
    };

    if driver.is_plan_ready() {
        tx.send(Event::PlanReady())?;
        return finalize_plan(driver, plan_files, tx).await;
    }

    tx.send(Event::AssistantReply(reply))?;
    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Owns the chat session and handles actions one at a time, so the
    /// transcript is never touched concurrently. Every action is answered with
    /// a final `ActionDone` event.
    pub async fn start(
        mut driver: ConversationDriver,
        plan_files: PlanFiles,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::ChatTurn(text) => {
                    chat_turn(&mut driver, &plan_files, &tx, &text).await?;
                }
                Action::ClearHistory() => {
                    driver.clear();
                    history(&driver, &tx)?;
                }
                Action::FinalizePlan() => {
                    finalize_plan(&mut driver, &plan_files, &tx).await?;
                }
            }

            tx.send(Event::ActionDone())?;
        }

        return Ok(());
    }
}

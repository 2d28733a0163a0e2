use std::path;

use super::PlanDocument;
use super::Turn;

#[derive(Debug)]
pub enum Event {
    /// Sent once an action has been fully handled.
    ActionDone(),
    AssistantReply(String),
    HistoryCleared(Vec<Turn>),
    PlanGenerated(PlanDocument, path::PathBuf),
    PlanReady(),
    WorkerError(String),
}

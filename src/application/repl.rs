#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::Turn;
use crate::domain::services::actions::help_text;

#[derive(Debug)]
pub enum Input {
    Quit,
    Help,
    Send(Action),
}

pub fn parse_input(line: &str) -> Input {
    if line.trim().starts_with('/') {
        if let Some(command) = SlashCommand::parse(line) {
            if command.is_quit() {
                return Input::Quit;
            }
            if command.is_help() {
                return Input::Help;
            }
            if command.is_clear() {
                return Input::Send(Action::ClearHistory());
            }
            if command.is_plan() {
                return Input::Send(Action::FinalizePlan());
            }
        }
    }

    return Input::Send(Action::ChatTurn(line.to_string()));
}

pub fn format_turn(turn: &Turn) -> String {
    let author = match turn.role {
        Role::Assistant => Paint::cyan("Assistant").bold(),
        _ => Paint::magenta("You").bold(),
    };

    return format!("{author}: {}", turn.text.trim());
}

pub fn format_event(event: &Event) -> Option<String> {
    match event {
        Event::ActionDone() => return None,
        Event::AssistantReply(text) => return Some(format_turn(&Turn::assistant(text))),
        Event::HistoryCleared(turns) => {
            let history = turns
                .iter()
                .map(format_turn)
                .collect::<Vec<String>>()
                .join("\n\n");
            return Some(format!(
                "{}\n\n{history}",
                Paint::yellow("Chat history cleared.")
            ));
        }
        Event::PlanGenerated(plan, file_path) => {
            return Some(format!(
                "{}\n\n{}\n\n{}",
                Paint::new("Your Personalized Study Plan").underline().bold(),
                plan.text.trim(),
                Paint::green(format!("Saved to {}", file_path.display()))
            ));
        }
        Event::PlanReady() => {
            return Some(
                Paint::green("Got everything I need, generating your personalized study plan...")
                    .to_string(),
            );
        }
        Event::WorkerError(text) => {
            return Some(Paint::red(format!("Error: {text}")).to_string());
        }
    }
}

/// Prints events until the worker reports the action as done. Returns false
/// when the worker has gone away.
async fn wait_for_action(rx: &mut mpsc::UnboundedReceiver<Event>) -> bool {
    while let Some(event) = rx.recv().await {
        if let Event::ActionDone() = event {
            return true;
        }
        if let Some(text) = format_event(&event) {
            println!("\n{text}\n");
        }
    }

    return false;
}

fn prompt() -> Result<()> {
    print!("{} ", Paint::magenta("You:").bold());
    std::io::stdout().flush()?;
    return Ok(());
}

pub async fn start(
    greeting: Vec<Turn>,
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    for turn in greeting.iter() {
        println!("{}\n", format_turn(turn));
    }
    println!("{}\n", Paint::new("Type /help for commands.").dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Help => {
                println!("\n{}\n", help_text());
            }
            Input::Send(action) => {
                tx.send(action)?;
                if !wait_for_action(&mut rx).await {
                    break;
                }
            }
        }
    }

    return Ok(());
}

use std::sync::Arc;

use anyhow::Result;
use test_utils::search_reply_fixture;

use super::ConversationDriver;
use crate::domain::models::PlanError;
use crate::domain::models::PlanOrigin;
use crate::domain::models::Role;
use crate::domain::models::Transcript;
use crate::domain::models::Turn;
use crate::domain::services::fakes::FakeBackend;
use crate::domain::services::fakes::FakeSearch;
use crate::domain::services::Assistant;

fn count_role(turns: &[Turn], role: Role) -> usize {
    return turns.iter().filter(|turn| return turn.role == role).count();
}

fn driver(backend: &FakeBackend, search: &FakeSearch) -> ConversationDriver {
    let assistant = Assistant::new(Box::new(backend.clone()), Box::new(search.clone()));
    return ConversationDriver::new(Arc::new(assistant));
}

#[tokio::test]
async fn it_appends_user_turn_before_requesting() -> Result<()> {
    let backend = FakeBackend::with_replies(&["What are your learning goals?"]);
    let mut driver = driver(&backend, &FakeSearch::default());

    driver.turn("Statistics").await?;

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 1);

    // Instruction, greeting, the new user turn, then the tool reminder.
    let turns = &prompts[0].turns;
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[2], Turn::user("Statistics"));
    assert_eq!(turns[3].role, Role::Instruction);
    assert!(turns[3].text.starts_with("Available tool: ResourceSearch"));

    return Ok(());
}

#[tokio::test]
async fn it_appends_reply_as_assistant_turn() -> Result<()> {
    let backend = FakeBackend::with_replies(&["What are your learning goals?"]);
    let mut driver = driver(&backend, &FakeSearch::default());

    let reply = driver.turn("Statistics").await?;

    assert_eq!(reply, "What are your learning goals?");
    assert!(!driver.is_plan_ready());
    assert_eq!(driver.transcript().turns().len(), 4);
    assert_eq!(
        driver.transcript().turns().last(),
        Some(&Turn::assistant("What are your learning goals?"))
    );
    assert_eq!(count_role(driver.transcript().turns(), Role::User), 1);

    return Ok(());
}

#[tokio::test]
async fn it_does_not_resend_the_reminder_as_history() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Goals?", "Time?"]);
    let mut driver = driver(&backend, &FakeSearch::default());

    driver.turn("Statistics").await?;
    driver.turn("Pass my exam").await?;

    let second = &backend.prompts()[1].turns;
    let reminders = second
        .iter()
        .filter(|turn| return turn.text.starts_with("Available tool:"))
        .count();
    assert_eq!(reminders, 1);
    assert_eq!(second.len(), 6);

    return Ok(());
}

#[tokio::test]
async fn it_substitutes_search_results() -> Result<()> {
    let backend = FakeBackend::with_replies(&[search_reply_fixture()]);
    let search = FakeSearch::default();
    let mut driver = driver(&backend, &search);

    let reply = driver.turn("Linear algebra").await?;

    assert!(!reply.contains("[SEARCH]best books for learning linear algebra"));
    assert!(reply
        .contains("Found resources: results for best books for learning linear algebra"));
    assert_eq!(
        search.queries(),
        vec!["best books for learning linear algebra".to_string()]
    );
    assert_eq!(driver.transcript().turns().last(), Some(&Turn::assistant(&reply)));

    return Ok(());
}

#[tokio::test]
async fn it_substitutes_repeated_search_markers() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Try [SEARCH]rust books [SEARCH]rust books"]);
    let search = FakeSearch::default();
    let mut driver = driver(&backend, &search);

    let reply = driver.turn("Rust").await?;

    assert!(!reply.contains("[SEARCH]rust books"));
    assert_eq!(
        reply,
        "Try Found resources: results for rust books Found resources: results for rust books"
    );
    assert_eq!(search.queries(), vec!["rust books".to_string()]);

    return Ok(());
}

#[tokio::test]
async fn it_flags_plan_ready_and_skips_reply() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Perfect! Here is your Study Plan outline..."]);
    let mut driver = driver(&backend, &FakeSearch::default());

    let reply = driver.turn("Visual").await?;

    assert_eq!(reply, "Perfect! Here is your Study Plan outline...");
    assert!(driver.is_plan_ready());
    assert_eq!(driver.transcript().turns().len(), 3);
    assert_eq!(driver.transcript().turns().last(), Some(&Turn::user("Visual")));

    return Ok(());
}

#[tokio::test]
async fn it_checks_plan_phrase_after_search() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Let me find material [SEARCH]rust"]);
    let mut driver = driver(&backend, &FakeSearch::default());

    // Search results never contain the phrase, so the reply is kept.
    driver.turn("Rust").await?;
    assert!(!driver.is_plan_ready());
    assert_eq!(count_role(driver.transcript().turns(), Role::Assistant), 2);

    return Ok(());
}

#[tokio::test]
async fn it_rejects_empty_messages() {
    let backend = FakeBackend::default();
    let mut driver = driver(&backend, &FakeSearch::default());

    let res = driver.turn("   ").await;

    let err = res.unwrap_err();
    assert_eq!(
        err.downcast_ref::<PlanError>(),
        Some(&PlanError::EmptyMessage)
    );
    assert_eq!(driver.transcript(), &Transcript::default());
    assert!(backend.prompts().is_empty());
}

#[tokio::test]
async fn it_fails_fast_when_search_fails() {
    let backend = FakeBackend::with_replies(&["[SEARCH]chemistry videos"]);
    let mut driver = driver(&backend, &FakeSearch::failing());

    let res = driver.turn("Chemistry").await;

    assert!(res.is_err());
    assert!(!driver.is_plan_ready());
    assert_eq!(driver.transcript().turns().len(), 3);
    assert_eq!(driver.transcript().turns().last(), Some(&Turn::user("Chemistry")));
}

#[tokio::test]
async fn it_clears_history() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Goals?", "Here is your study plan!"]);
    let mut driver = driver(&backend, &FakeSearch::default());
    let first_id = driver.id().to_string();

    driver.turn("History").await?;
    driver.turn("Exams").await?;
    assert!(driver.is_plan_ready());

    driver.clear();

    assert_eq!(driver.transcript(), &Transcript::default());
    assert_eq!(driver.transcript().turns().len(), 2);
    assert!(!driver.is_plan_ready());
    assert_ne!(driver.id(), first_id);

    return Ok(());
}

#[tokio::test]
async fn it_finalizes_plan_from_profile() -> Result<()> {
    let backend = FakeBackend::with_replies(&[
        "What are your learning goals?",
        "Here is your study plan, generating it now.",
        "# Week 1\n- Limits",
    ]);
    let mut driver = driver(&backend, &FakeSearch::default());

    driver.turn("Calculus").await?;
    driver.turn("Ace the final exam").await?;
    assert!(driver.is_plan_ready());

    let plan = driver.finalize().await?;

    assert_eq!(plan.origin, PlanOrigin::Chat);
    assert_eq!(plan.text, "# Week 1\n- Limits");
    assert_eq!(plan.file_name(), "study_plan.md");

    let prompts = backend.prompts();
    let plan_prompt = &prompts[2].turns[0];
    assert_eq!(plan_prompt.role, Role::User);
    assert!(plan_prompt.text.contains("- Subject: Calculus"));
    assert!(plan_prompt.text.contains("- Learning goals: Ace the final exam"));

    assert_eq!(driver.transcript(), &Transcript::default());
    assert!(!driver.is_plan_ready());

    return Ok(());
}

#[tokio::test]
async fn it_keeps_session_when_finalize_fails() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Goals?"]);
    let mut driver = driver(&backend, &FakeSearch::default());

    driver.turn("Calculus").await?;
    let res = driver.finalize().await;

    assert!(res.is_err());
    assert_eq!(driver.transcript().turns().len(), 4);

    return Ok(());
}

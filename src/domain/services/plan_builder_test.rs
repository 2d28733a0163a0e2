use std::sync::Arc;

use anyhow::Result;
use test_utils::syllabus_fixture;

use super::plan_prompt;
use super::syllabus_prompt;
use super::PlanRequestBuilder;
use super::RESOURCE_INSTRUCTION;
use crate::domain::models::PlanError;
use crate::domain::models::PlanOrigin;
use crate::domain::models::ProfileData;
use crate::domain::models::ProfileField;
use crate::domain::models::Role;
use crate::domain::models::SyllabusRequest;
use crate::domain::models::Turn;
use crate::domain::services::fakes::FakeBackend;
use crate::domain::services::fakes::FakeSearch;
use crate::domain::services::Assistant;

fn builder(backend: &FakeBackend, search: &FakeSearch) -> PlanRequestBuilder {
    let assistant = Assistant::new(Box::new(backend.clone()), Box::new(search.clone()));
    return PlanRequestBuilder::new(Arc::new(assistant));
}

#[test]
fn it_embeds_profile_in_plan_prompt() {
    let mut profile = ProfileData::default();
    profile.record(ProfileField::Subject, "Spanish");

    let prompt = plan_prompt(&profile);
    assert!(prompt.starts_with("Generate comprehensive study plan with:"));
    assert!(prompt.contains("Student Profile:\n- Subject: Spanish\n"));
    assert!(prompt.ends_with("5. Practice Exercises"));
}

#[test]
fn it_embeds_syllabus_and_limits() {
    let prompt = syllabus_prompt(&SyllabusRequest::new(syllabus_fixture(), 14, 3));

    assert!(prompt.contains(syllabus_fixture()));
    assert!(prompt.contains("- Duration: 14 days (3 hrs/day)"));
}

#[tokio::test]
async fn it_builds_plan_in_one_request() -> Result<()> {
    let backend = FakeBackend::with_replies(&["## Plan"]);
    let planner = builder(&backend, &FakeSearch::default());

    let plan = planner.build_plan(&ProfileData::default()).await?;

    assert_eq!(plan.origin, PlanOrigin::Chat);
    assert_eq!(plan.text, "## Plan");

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].turns.len(), 2);
    assert_eq!(prompts[0].turns[0].role, Role::User);
    assert!(prompts[0].turns[0]
        .text
        .contains("No profile details were collected."));
    assert_eq!(prompts[0].turns[1], Turn::instruction(RESOURCE_INSTRUCTION));

    return Ok(());
}

#[tokio::test]
async fn it_builds_plan_from_syllabus() -> Result<()> {
    let backend = FakeBackend::with_replies(&["## Syllabus plan"]);
    let planner = builder(&backend, &FakeSearch::default());

    let plan = planner
        .build_plan_from_syllabus(&SyllabusRequest::new(syllabus_fixture(), 30, 2))
        .await?;

    assert_eq!(plan.origin, PlanOrigin::Syllabus);
    assert_eq!(plan.text, "## Syllabus plan");
    assert_eq!(plan.file_name(), "syllabus_plan.md");
    assert!(backend.prompts()[0].turns[0]
        .text
        .contains("- Duration: 30 days (2 hrs/day)"));

    return Ok(());
}

#[tokio::test]
async fn it_does_not_check_plan_phrase_in_one_shot_replies() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Here is your study plan:\n- Week 1"]);
    let planner = builder(&backend, &FakeSearch::default());

    let plan = planner.build_plan(&ProfileData::default()).await?;
    assert_eq!(plan.text, "Here is your study plan:\n- Week 1");

    return Ok(());
}

#[tokio::test]
async fn it_resolves_search_markers_in_one_shot_replies() -> Result<()> {
    let backend = FakeBackend::with_replies(&["Week 1: Units 1-2\n[SEARCH]intro programming books"]);
    let search = FakeSearch::default();
    let planner = builder(&backend, &search);

    let plan = planner
        .build_plan_from_syllabus(&SyllabusRequest::new(syllabus_fixture(), 30, 2))
        .await?;

    assert_eq!(
        plan.text,
        "Week 1: Units 1-2\nFound resources: results for intro programming books"
    );
    assert_eq!(search.queries(), vec!["intro programming books".to_string()]);

    return Ok(());
}

#[tokio::test]
async fn it_rejects_invalid_syllabus_requests() {
    let backend = FakeBackend::default();
    let planner = builder(&backend, &FakeSearch::default());

    let res = planner
        .build_plan_from_syllabus(&SyllabusRequest::new("", 10, 3))
        .await;
    assert_eq!(
        res.unwrap_err().downcast_ref::<PlanError>(),
        Some(&PlanError::EmptySyllabus)
    );

    let res = planner
        .build_plan_from_syllabus(&SyllabusRequest::new("Unit 1", 0, 3))
        .await;
    assert_eq!(
        res.unwrap_err().downcast_ref::<PlanError>(),
        Some(&PlanError::InvalidDays(0))
    );

    assert!(backend.prompts().is_empty());
}

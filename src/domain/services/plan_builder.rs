#[cfg(test)]
#[path = "plan_builder_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;

use super::Assistant;
use crate::domain::models::BackendPrompt;
use crate::domain::models::PlanDocument;
use crate::domain::models::PlanOrigin;
use crate::domain::models::ProfileData;
use crate::domain::models::SyllabusRequest;
use crate::domain::models::Turn;

pub const RESOURCE_INSTRUCTION: &str = "Use ResourceSearch tool for finding relevant resources";

pub fn plan_prompt(profile: &ProfileData) -> String {
    return format!(
        r#"Generate comprehensive study plan with:
- Weekly schedule with time allocations
- Topic-wise breakdown with key concepts
- Curated resources from ResourceSearch tool
- Practice exercises and projects
- Progress tracking system

Student Profile:
{profile}

Format for each topic:
1. Topic Name
2. Time Allocation
3. Resources (use ResourceSearch if needed)
4. Key Concepts
5. Practice Exercises"#,
        profile = profile.render()
    );
}

pub fn syllabus_prompt(request: &SyllabusRequest) -> String {
    return format!(
        r#"Create detailed study plan from this syllabus:
{syllabus}

Requirements:
- Duration: {days} days ({hours} hrs/day)
- Include topic-wise resource recommendations (use ResourceSearch tool)
- Add practice tests schedule
- Suggest reference books and online materials
- Use the ResourceSearch tool only if additional resources (books, videos, online materials, etc.) are necessary.
- Include project/work suggestions"#,
        syllabus = request.text,
        days = request.total_days,
        hours = request.daily_hours
    );
}

/// One-shot plan generation. Never reads or writes a transcript.
pub struct PlanRequestBuilder {
    assistant: Arc<Assistant>,
}

impl PlanRequestBuilder {
    pub fn new(assistant: Arc<Assistant>) -> PlanRequestBuilder {
        return PlanRequestBuilder { assistant };
    }

    pub async fn build_plan(&self, profile: &ProfileData) -> Result<PlanDocument> {
        let text = self.send(&plan_prompt(profile)).await?;
        return Ok(PlanDocument::new(PlanOrigin::Chat, &text));
    }

    pub async fn build_plan_from_syllabus(&self, request: &SyllabusRequest) -> Result<PlanDocument> {
        request.validate()?;

        tracing::debug!(
            total_days = request.total_days,
            daily_hours = request.daily_hours,
            syllabus_len = request.text.len(),
            "Building plan from syllabus"
        );

        let text = self.send(&syllabus_prompt(request)).await?;
        return Ok(PlanDocument::new(PlanOrigin::Syllabus, &text));
    }

    /// The completion phrase is meaningless here, but search markers are still
    /// resolved since the prompt tells the model to search.
    async fn send(&self, text: &str) -> Result<String> {
        let prompt =
            BackendPrompt::new(vec![Turn::user(text)]).with_instruction(RESOURCE_INSTRUCTION);
        let reply = self.assistant.complete(prompt).await?;

        return self.assistant.resolve_search(reply).await;
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;

use super::PlanError;

pub const DEFAULT_TOTAL_DAYS: u32 = 30;
pub const DEFAULT_DAILY_HOURS: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PlanOrigin {
    /// Finalized from a guided chat.
    Chat,
    /// Generated in one shot from syllabus content.
    Syllabus,
}

impl PlanOrigin {
    pub fn file_name(&self) -> &'static str {
        match self {
            PlanOrigin::Chat => return "study_plan.md",
            PlanOrigin::Syllabus => return "syllabus_plan.md",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanDocument {
    pub origin: PlanOrigin,
    pub text: String,
}

impl PlanDocument {
    pub fn new(origin: PlanOrigin, text: &str) -> PlanDocument {
        return PlanDocument {
            origin,
            text: text.to_string(),
        };
    }

    pub fn file_name(&self) -> &'static str {
        return self.origin.file_name();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyllabusRequest {
    pub text: String,
    pub total_days: u32,
    pub daily_hours: u32,
}

impl SyllabusRequest {
    pub fn new(text: &str, total_days: u32, daily_hours: u32) -> SyllabusRequest {
        return SyllabusRequest {
            text: text.to_string(),
            total_days,
            daily_hours,
        };
    }

    /// Days and hours have no upper bound, the model is trusted to respect
    /// whatever it is given.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.text.trim().is_empty() {
            return Err(PlanError::EmptySyllabus);
        }
        if self.total_days < 1 {
            return Err(PlanError::InvalidDays(self.total_days));
        }
        if self.daily_hours < 1 {
            return Err(PlanError::InvalidHours(self.daily_hours));
        }

        return Ok(());
    }
}

use thiserror::Error;

/// Input validation failures surfaced to the student as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Please type a message before sending it.")]
    EmptyMessage,

    #[error("Please upload or paste syllabus content.")]
    EmptySyllabus,

    #[error("Total available days must be at least 1, got {0}.")]
    InvalidDays(u32),

    #[error("Daily study hours must be at least 1, got {0}.")]
    InvalidHours(u32),
}

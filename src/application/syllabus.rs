#[cfg(test)]
#[path = "syllabus_test.rs"]
mod tests;

use anyhow::Result;
use tokio::io::AsyncReadExt;
use yansi::Paint;

use super::cli::SyllabusInput;
use crate::domain::models::PlanError;
use crate::domain::services::SyllabusTextExtractor;

async fn read_stdin() -> Result<String> {
    eprintln!(
        "{}",
        Paint::new("Paste your syllabus, then press Ctrl-D.").dimmed()
    );
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    return Ok(text);
}

/// Loads the syllabus from a file, pasted text, or stdin. Blank syllabi are
/// rejected with [`PlanError::EmptySyllabus`] before any model is contacted.
pub async fn read_syllabus(input: &SyllabusInput) -> Result<String> {
    let text = match (&input.file, &input.text) {
        (Some(file_path), _) => {
            let text = SyllabusTextExtractor::extract_file(file_path).await?;
            if !text.trim().is_empty() {
                eprintln!("{}", Paint::green("File processed successfully"));
            }
            text
        }
        (None, Some(text)) => text.to_string(),
        (None, None) => read_stdin().await?,
    };

    if text.trim().is_empty() {
        return Err(PlanError::EmptySyllabus.into());
    }

    return Ok(text);
}

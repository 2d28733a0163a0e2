#[cfg(test)]
#[path = "plan_files_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::PlanDocument;

/// Writes generated plans to disk as markdown, one file per plan origin.
pub struct PlanFiles {
    pub output_dir: path::PathBuf,
}

impl Default for PlanFiles {
    fn default() -> PlanFiles {
        return PlanFiles::new(path::PathBuf::from(Config::get(ConfigKey::OutputDir)));
    }
}

impl PlanFiles {
    pub fn new(output_dir: path::PathBuf) -> PlanFiles {
        return PlanFiles { output_dir };
    }

    pub fn file_path(&self, plan: &PlanDocument) -> path::PathBuf {
        return self.output_dir.join(plan.file_name());
    }

    /// Overwrites any previous plan of the same origin.
    pub async fn save(&self, plan: &PlanDocument) -> Result<path::PathBuf> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).await?;
        }

        let file_path = self.file_path(plan);
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(plan.text.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(path = %file_path.display(), "Saved study plan");
        return Ok(file_path);
    }
}

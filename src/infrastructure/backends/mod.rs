pub mod ollama;
pub mod openai;

use anyhow::Result;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> Result<BackendBox> {
        match name {
            BackendName::OpenAI => return Ok(Box::<openai::OpenAI>::default()),
            BackendName::Ollama => return Ok(Box::<ollama::Ollama>::default()),
        }
    }
}

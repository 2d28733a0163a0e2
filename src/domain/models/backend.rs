#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Turn;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    /// Any OpenAI compatible chat completions API, Groq included.
    OpenAI,
    Ollama,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

/// An ordered list of turns sent to a backend as one completion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendPrompt {
    pub turns: Vec<Turn>,
}

impl BackendPrompt {
    pub fn new(turns: Vec<Turn>) -> BackendPrompt {
        return BackendPrompt { turns };
    }

    pub fn with_instruction(mut self, text: &str) -> BackendPrompt {
        self.turns.push(Turn::instruction(text));
        return self;
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    async fn list_models(&self) -> Result<Vec<String>>;

    /// Requests a single, complete reply for the prompt. Nothing is streamed,
    /// the reply is only returned once the backend has finished generating.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::SearchName;
use crate::domain::models::SearchProvider;

/// Backend answering with scripted replies, in order, and recording every
/// prompt it receives.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub replies: Arc<Mutex<VecDeque<String>>>,
    pub prompts: Arc<Mutex<Vec<BackendPrompt>>>,
}

impl FakeBackend {
    pub fn with_replies(replies: &[&str]) -> FakeBackend {
        let backend = FakeBackend::default();
        backend
            .replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|e| return e.to_string()));
        return backend;
    }

    pub fn prompts(&self) -> Vec<BackendPrompt> {
        return self.prompts.lock().unwrap().clone();
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> BackendName {
        return BackendName::OpenAI;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        return Ok(vec!["fake".to_string()]);
    }

    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt);
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return Ok(reply);
        }

        bail!("FakeBackend ran out of replies");
    }
}

/// Search provider returning `"results for <query>"`, or failing when asked to.
#[derive(Clone, Default)]
pub struct FakeSearch {
    pub fail: bool,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl FakeSearch {
    pub fn failing() -> FakeSearch {
        return FakeSearch {
            fail: true,
            queries: Arc::default(),
        };
    }

    pub fn queries(&self) -> Vec<String> {
        return self.queries.lock().unwrap().clone();
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> SearchName {
        return SearchName::Serper;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn search(&self, query: &str) -> Result<String> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            bail!("search is down");
        }

        return Ok(format!("results for {query}"));
    }
}

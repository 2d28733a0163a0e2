#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::classifier::ClassifierBox;
use super::classifier::MarkerClassifier;
use super::classifier::ReplyClassifier;
use super::classifier::SEARCH_HINT;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::SearchBox;
use crate::domain::models::SearchName;
use crate::domain::models::SEARCH_TOOL_DESCRIPTION;
use crate::domain::models::SEARCH_TOOL_NAME;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::search::SearchManager;

/// The external collaborators every flow talks to: a completion backend, a
/// search provider, and the classifier reading replies.
pub struct Assistant {
    backend: BackendBox,
    search: SearchBox,
    classifier: ClassifierBox,
}

impl Assistant {
    pub fn new(backend: BackendBox, search: SearchBox) -> Assistant {
        return Assistant {
            backend,
            search,
            classifier: Box::<MarkerClassifier>::default(),
        };
    }

    pub fn with_classifier(mut self, classifier: ClassifierBox) -> Assistant {
        self.classifier = classifier;
        return self;
    }

    /// Builds from configuration and verifies both collaborators are usable,
    /// so a missing token fails at startup rather than on the first message.
    pub async fn from_config() -> Result<Assistant> {
        let backend_name = Config::get(ConfigKey::Backend);
        let backend = match BackendName::parse(backend_name.to_string()) {
            Some(name) => BackendManager::get(name)?,
            None => bail!(format!("No backend implemented for {backend_name}")),
        };

        let search_name = Config::get(ConfigKey::Search);
        let search = match SearchName::parse(search_name.to_string()) {
            Some(name) => SearchManager::get(name)?,
            None => bail!(format!("No search provider implemented for {search_name}")),
        };

        let assistant = Assistant::new(backend, search);
        assistant.health_check().await?;
        assistant.warn_unknown_model(&Config::get(ConfigKey::Model)).await;

        return Ok(assistant);
    }

    async fn warn_unknown_model(&self, model: &str) {
        match self.backend.list_models().await {
            Ok(models) => {
                if !models.is_empty() && !models.iter().any(|e| return e == model) {
                    tracing::warn!(
                        model = model,
                        backend = %self.backend.name(),
                        "Configured model is not listed by the backend"
                    );
                }
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Unable to list backend models");
            }
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        if let Err(err) = self.backend.health_check().await {
            bail!(format!(
                "Backend {} failed its health check: {err}",
                self.backend.name()
            ));
        }
        if let Err(err) = self.search.health_check().await {
            bail!(format!(
                "Search provider {} failed its health check: {err}",
                self.search.name()
            ));
        }

        return Ok(());
    }

    pub fn classifier(&self) -> &dyn ReplyClassifier {
        return self.classifier.as_ref();
    }

    /// Reminder sent as a trailing instruction with every chat request.
    pub fn tool_reminder(&self) -> String {
        return format!(
            "Available tool: {SEARCH_TOOL_NAME} - {SEARCH_TOOL_DESCRIPTION}. {SEARCH_HINT}"
        );
    }

    pub async fn complete(&self, prompt: BackendPrompt) -> Result<String> {
        tracing::debug!(
            backend = %self.backend.name(),
            turns = prompt.turns.len(),
            "Requesting completion"
        );
        return self.backend.get_completion(prompt).await;
    }

    /// Runs the search a reply asks for, if any, and splices the results into
    /// the reply. Search failures abort with an error.
    pub async fn resolve_search(&self, reply: String) -> Result<String> {
        let request = match self.classifier.search_request(&reply) {
            Some(request) => request,
            None => return Ok(reply),
        };

        tracing::debug!(query = %request.query, "Reply requested a search");
        let results = self.search.search(&request.query).await?;

        return Ok(request.substitute(&reply, &results));
    }
}

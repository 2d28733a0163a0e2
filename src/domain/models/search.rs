use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Name the model knows the search capability by.
pub const SEARCH_TOOL_NAME: &str = "ResourceSearch";
pub const SEARCH_TOOL_DESCRIPTION: &str =
    "Search for up-to-date educational resources and learning materials";

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SearchName {
    Serper,
}

impl SearchName {
    pub fn parse(text: String) -> Option<SearchName> {
        return SearchName::iter().find(|e| return e.to_string() == text);
    }
}

#[async_trait]
pub trait SearchProvider {
    fn name(&self) -> SearchName;

    /// Verifies the provider is configured. Implementations should avoid
    /// spending a search request on it.
    async fn health_check(&self) -> Result<()>;

    /// Runs a web search and returns the results as free text, ready to be
    /// embedded in a reply.
    async fn search(&self, query: &str) -> Result<String>;
}

pub type SearchBox = Box<dyn SearchProvider + Send + Sync>;

#[cfg(test)]
#[path = "serper_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SearchName;
use crate::domain::models::SearchProvider;

pub const NO_RESULTS: &str = "No good Google Search Result was found";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SearchRequest {
    q: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
    snippet_highlighted: Option<Vec<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct KnowledgeGraph {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct OrganicResult {
    title: String,
    link: String,
    snippet: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    answer_box: Option<AnswerBox>,
    knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

impl SearchResponse {
    /// Flattens the response to text. A direct answer wins over the knowledge
    /// graph, which wins over the organic results.
    fn to_text(&self) -> String {
        if let Some(answer_box) = &self.answer_box {
            if let Some(answer) = &answer_box.answer {
                return answer.to_string();
            }
            if let Some(snippet) = &answer_box.snippet {
                return snippet.replace('\n', " ");
            }
            if let Some(highlighted) = &answer_box.snippet_highlighted {
                return highlighted.join(" ");
            }
        }

        if let Some(description) = self
            .knowledge_graph
            .as_ref()
            .and_then(|graph| return graph.description.as_ref())
        {
            return description.to_string();
        }

        if self.organic.is_empty() {
            return NO_RESULTS.to_string();
        }

        return self
            .organic
            .iter()
            .map(|result| {
                let mut line = format!("\n- {} ({})", result.title, result.link);
                if let Some(snippet) = &result.snippet {
                    line = format!("{line}: {snippet}");
                }
                return line;
            })
            .collect::<Vec<String>>()
            .join("");
    }
}

pub struct Serper {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Serper {
    fn default() -> Serper {
        return Serper {
            url: Config::get(ConfigKey::SerperURL),
            token: Config::get(ConfigKey::SerperToken),
            timeout: Config::get(ConfigKey::BackendTimeout),
        };
    }
}

#[async_trait]
impl SearchProvider for Serper {
    fn name(&self) -> SearchName {
        return SearchName::Serper;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Serper URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Serper token is not defined. Set it with --serper-token or STUDYPLANNER_SERPER_TOKEN");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn search(&self, query: &str) -> Result<String> {
        let req = SearchRequest {
            q: query.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/search", url = self.url))
            .header("X-API-KEY", &self.token)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                query = query,
                "Failed to make search request to Serper"
            );
            bail!("Failed to make search request to Serper");
        }

        let sres = res.json::<SearchResponse>().await?;
        tracing::debug!(body = ?sres, "Search response");

        return Ok(sres.to_text());
    }
}

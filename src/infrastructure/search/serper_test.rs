use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::serper_fixture;

use super::AnswerBox;
use super::KnowledgeGraph;
use super::SearchResponse;
use super::Serper;
use super::NO_RESULTS;
use crate::domain::models::SearchProvider;

impl Serper {
    fn with_url(url: String) -> Serper {
        return Serper {
            url,
            token: "abc".to_string(),
            timeout: "1000".to_string(),
        };
    }
}

#[tokio::test]
async fn it_fails_health_checks_without_token() {
    let mut serper = Serper::with_url("http://localhost:1".to_string());
    assert!(serper.health_check().await.is_ok());

    serper.token = "".to_string();
    assert!(serper.health_check().await.is_err());
}

#[tokio::test]
async fn it_searches() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/search")
        .match_header("X-API-KEY", "abc")
        .match_body(Matcher::Json(json!({ "q": "linear algebra books" })))
        .with_status(200)
        .with_body(serper_fixture())
        .create();

    let serper = Serper::with_url(server.url());
    let res = serper.search("linear algebra books").await?;

    mock.assert();
    assert_eq!(
        res,
        "\n- Linear Algebra Done Right (https://linear.axler.net/): Linear Algebra Done Right by Sheldon Axler, free open access edition.\n- MIT 18.06 (https://ocw.mit.edu/courses/18-06-linear-algebra-spring-2010/): Gilbert Strang's video lectures on linear algebra."
    );

    return Ok(());
}

#[tokio::test]
async fn it_fails_search_on_error_status() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/search").with_status(403).create();

    let serper = Serper::with_url(server.url());
    let res = serper.search("anything").await;

    mock.assert();
    assert!(res.is_err());
}

#[test]
fn it_prefers_answer_box() {
    let res = SearchResponse {
        answer_box: Some(AnswerBox {
            answer: Some("42".to_string()),
            snippet: Some("ignored".to_string()),
            snippet_highlighted: None,
        }),
        knowledge_graph: Some(KnowledgeGraph {
            title: Some("Douglas Adams".to_string()),
            description: Some("ignored".to_string()),
        }),
        organic: vec![],
    };

    assert_eq!(res.to_text(), "42");
}

#[test]
fn it_falls_back_to_knowledge_graph() {
    let res = SearchResponse {
        answer_box: None,
        knowledge_graph: Some(KnowledgeGraph {
            title: Some("Calculus".to_string()),
            description: Some("Calculus is the study of continuous change.".to_string()),
        }),
        organic: vec![],
    };

    assert_eq!(res.to_text(), "Calculus is the study of continuous change.");
}

#[test]
fn it_reports_no_results() {
    let res: SearchResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(res.to_text(), NO_RESULTS);
}

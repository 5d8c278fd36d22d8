mod common;

use common::ScriptedCompletion;
use newsbrief::agent::{build_prompt, AgentError};
use newsbrief::config::ConfigError;
use newsbrief::pipeline::Advisory;
use newsbrief::{ArticleSource, Config, Outcome, Pipeline};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "<html><body><p>Hello.</p><p>World.</p></body></html>";

fn pipeline_with(backend: Arc<ScriptedCompletion>) -> Pipeline {
    Pipeline::new(Config::default(), backend).unwrap()
}

async fn serve_page(body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn url_to_summary_end_to_end() {
    let server = serve_page(PAGE, 200).await;
    let backend = Arc::new(ScriptedCompletion::replying("  Greetings to the world.  \n"));
    let pipeline = pipeline_with(backend.clone());

    let url = format!("{}/article", server.uri());
    let outcome = pipeline.run(&url).await.unwrap();

    match outcome {
        Outcome::Summary(summary) => assert_eq!(summary.text, "Greetings to the world."),
        other => panic!("expected a summary, got {other:?}"),
    }
    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(*prompts, vec![build_prompt("Hello. World.")]);
}

#[tokio::test]
async fn fetch_sends_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = pipeline_with(Arc::new(ScriptedCompletion::replying("ok")));
    let resolved = pipeline
        .resolve(&ArticleSource::Url(server.uri()))
        .await
        .unwrap();
    assert_eq!(resolved.article.text, "Hello. World.");
    assert_eq!(resolved.advisory, None);
}

#[tokio::test]
async fn http_error_status_never_reaches_the_model() {
    let server = serve_page("gone", 404).await;
    let backend = Arc::new(ScriptedCompletion::replying("unused"));
    let pipeline = pipeline_with(backend.clone());

    let url = format!("{}/article", server.uri());
    match pipeline.run(&url).await.unwrap() {
        Outcome::FetchFailed(message) => {
            assert!(message.starts_with(&format!("Failed to fetch news from {url}: ")));
        }
        other => panic!("expected a fetch failure, got {other:?}"),
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn connection_error_never_reaches_the_model() {
    let backend = Arc::new(ScriptedCompletion::replying("unused"));
    let pipeline = pipeline_with(backend.clone());

    let outcome = pipeline.run("http://127.0.0.1:1/article").await.unwrap();
    assert!(matches!(outcome, Outcome::FetchFailed(m) if m.starts_with("Failed to fetch news from")));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn page_without_paragraphs_gets_an_advisory() {
    let server = serve_page("<html><body><div id=\"app\"></div></body></html>", 200).await;
    let backend = Arc::new(ScriptedCompletion::replying("unused"));
    let pipeline = pipeline_with(backend.clone());

    let url = format!("{}/article", server.uri());
    let resolved = pipeline.resolve(&ArticleSource::Url(url.clone())).await.unwrap();
    assert_eq!(resolved.article.text, "");
    assert_eq!(resolved.advisory, Some(Advisory::NoParagraphs));

    assert!(matches!(
        pipeline.run(&url).await.unwrap(),
        Outcome::NoText(Advisory::NoParagraphs)
    ));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn empty_model_reply_is_not_a_summary() {
    let server = serve_page(PAGE, 200).await;
    let pipeline = pipeline_with(Arc::new(ScriptedCompletion::replying("\n  \n")));

    let url = format!("{}/article", server.uri());
    assert!(matches!(pipeline.run(&url).await.unwrap(), Outcome::EmptySummary));
}

#[tokio::test]
async fn model_error_is_returned_without_retry() {
    let server = serve_page(PAGE, 200).await;
    let backend = Arc::new(ScriptedCompletion::failing("invalid API key"));
    let pipeline = pipeline_with(backend.clone());

    let url = format!("{}/article", server.uri());
    let err = pipeline.run(&url).await.unwrap_err();
    assert!(err.to_string().contains("invalid API key"));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn raw_text_passes_through_unchanged() {
    let pipeline = pipeline_with(Arc::new(ScriptedCompletion::replying("ok")));
    let text = "  Pasted <p>article</p> text ";
    let resolved = pipeline
        .resolve(&ArticleSource::RawText(text.to_string()))
        .await
        .unwrap();
    assert_eq!(resolved.article.text, text);
    assert_eq!(resolved.article.url, None);
    assert_eq!(resolved.advisory, None);
}

#[test]
fn missing_api_key_stops_startup() {
    let err = Pipeline::from_config(Config::default()).err().unwrap();
    assert!(matches!(
        err,
        AgentError::ConfigError(ConfigError::MissingApiKey)
    ));
    assert!(err.to_string().contains("GOOGLE_API_KEY"));
}

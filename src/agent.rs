//! LLM agent module for article summarization.
//!
//! The prompt is a fixed template; the model call sits behind [`Completion`] so
//! front-ends and tests can swap the backend. Gemini is reached through rstructor.

pub use crate::summary::Summary;

use crate::config::Config;
use async_trait::async_trait;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use thiserror::Error;

const PROMPT_TEMPLATE: &str = "Summarize the following news article:\n\n{article}\n\nSummary:";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("nothing to summarize")]
    EmptyInput,
    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Client(#[from] crate::scraper::ScraperError),
}

/// A single-message completion endpoint.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Send one user message and return the raw response text
    async fn complete(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Google Gemini backend
pub struct GeminiCompletion {
    client: GeminiClient,
}

impl GeminiCompletion {
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let api_key = config.api_key()?;
        let model = parse_gemini_model(&config.agent.model);

        let client = GeminiClient::new(api_key)
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?
            .model(model)
            .temperature(config.agent.temperature);

        Ok(Self { client })
    }
}

#[async_trait]
impl Completion for GeminiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let result = self
            .client
            .generate_with_metadata(prompt)
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;
        Ok(result.text)
    }
}

/// Fill the fixed prompt template with the article text, verbatim
pub fn build_prompt(article: &str) -> String {
    PROMPT_TEMPLATE.replace("{article}", article)
}

/// Summarize article text with one backend call.
///
/// `Ok(None)` means the model answered with nothing; callers show a warning
/// and keep no summary. Errors are never retried.
pub async fn summarize(
    backend: &dyn Completion,
    text: &str,
) -> Result<Option<Summary>, AgentError> {
    if text.trim().is_empty() {
        return Err(AgentError::EmptyInput);
    }

    tracing::info!("summarising {} characters", text.len());
    let response = backend.complete(&build_prompt(text)).await?;

    let summary = Summary::from_response(&response);
    if summary.is_none() {
        tracing::warn!("model returned an empty summary");
    }
    Ok(summary)
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        other => {
            tracing::warn!("unknown model {other:?}, using gemini-2.0-flash");
            GeminiModel::Gemini20Flash
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Completion for Canned {
        async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(AgentError::RequestFailed)
        }
    }

    #[test]
    fn prompt_embeds_article_verbatim() {
        let prompt = build_prompt("Hello. World.");
        assert_eq!(
            prompt,
            "Summarize the following news article:\n\nHello. World.\n\nSummary:"
        );
    }

    #[test]
    fn prompt_does_not_expand_placeholders_in_article() {
        let prompt = build_prompt("literal {article} text");
        assert!(prompt.contains("literal {article} text"));
    }

    #[tokio::test]
    async fn calls_backend_once_and_trims() {
        let backend = Canned::new(Ok("  A short summary.\n"));
        let summary = summarize(&backend, "Hello. World.").await.unwrap();

        assert_eq!(summary.unwrap().text, "A short summary.");
        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], build_prompt("Hello. World."));
    }

    #[tokio::test]
    async fn empty_response_is_none() {
        let backend = Canned::new(Ok("   "));
        assert!(summarize(&backend, "text").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn backend_error_is_surfaced() {
        let backend = Canned::new(Err("quota exceeded"));
        let err = summarize(&backend, "text").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(backend.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_input_skips_backend() {
        let backend = Canned::new(Ok("unused"));
        assert!(matches!(
            summarize(&backend, " ").await,
            Err(AgentError::EmptyInput)
        ));
        assert!(backend.prompts.lock().unwrap().is_empty());
    }
}

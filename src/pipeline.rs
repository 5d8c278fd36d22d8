//! The fetch → extract → summarize pipeline shared by both front-ends.
//!
//! A [`Pipeline`] is built once per process from [`Config`] and owns the HTTP
//! client and the LLM backend.

use crate::agent::{self, AgentError, Completion, GeminiCompletion};
use crate::config::Config;
use crate::scraper::{self, ScraperError};
use crate::summary::{Article, ArticleSource, Summary};
use reqwest::Client;
use std::sync::Arc;

/// Non-fatal hint attached to an extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// The page had no `<p>` text, typically a client-rendered page
    NoParagraphs,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::NoParagraphs => "No paragraphs found. Might be JavaScript-based content.",
        }
    }
}

/// An article ready to summarize, plus any advisory raised while getting it
#[derive(Debug, Clone)]
pub struct Resolved {
    pub article: Article,
    pub advisory: Option<Advisory>,
}

/// Result of the command-line flow for one URL
#[derive(Debug)]
pub enum Outcome {
    Summary(Summary),
    EmptySummary,
    /// Nothing was extracted, so the model was not called
    NoText(Advisory),
    /// Human-readable failure, prefixed "Failed to fetch news from"
    FetchFailed(String),
}

#[derive(Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    client: Client,
    backend: Arc<dyn Completion>,
}

impl Pipeline {
    pub fn new(config: Config, backend: Arc<dyn Completion>) -> Result<Self, ScraperError> {
        let client = scraper::create_client(&config.fetch)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            backend,
        })
    }

    /// Build a pipeline talking to Gemini. Fails when the API key is missing.
    pub fn from_config(config: Config) -> Result<Self, AgentError> {
        let backend = GeminiCompletion::from_config(&config)?;
        Ok(Self::new(config, Arc::new(backend))?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn a source into article text. Raw text passes through unchanged.
    pub async fn resolve(&self, source: &ArticleSource) -> Result<Resolved, ScraperError> {
        match source {
            ArticleSource::RawText(text) => Ok(Resolved {
                article: Article::from_raw(text.as_str()),
                advisory: None,
            }),
            ArticleSource::Url(url) => {
                let article = scraper::fetch_article(&self.client, url.trim()).await?;
                let advisory = article.is_empty().then_some(Advisory::NoParagraphs);
                if let Some(advisory) = advisory {
                    tracing::warn!("{}: {}", url, advisory.message());
                }
                Ok(Resolved { article, advisory })
            }
        }
    }

    pub async fn summarize(&self, text: &str) -> Result<Option<Summary>, AgentError> {
        agent::summarize(self.backend.as_ref(), text).await
    }

    /// Fetch a URL and summarize it. Fetch failures come back as a message
    /// and never reach the model.
    pub async fn run(&self, url: &str) -> Result<Outcome, AgentError> {
        let resolved = match self.resolve(&ArticleSource::Url(url.to_string())).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!("{e}");
                return Ok(Outcome::FetchFailed(e.to_string()));
            }
        };

        if let Some(advisory) = resolved.advisory {
            return Ok(Outcome::NoText(advisory));
        }

        Ok(match self.summarize(&resolved.article.text).await? {
            Some(summary) => Outcome::Summary(summary),
            None => Outcome::EmptySummary,
        })
    }
}

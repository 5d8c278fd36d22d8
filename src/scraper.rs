//! Web scraping module for article extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing. Only `<p>` text is
//! extracted, in document order.

use crate::config::FetchConfig;
use crate::summary::Article;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").unwrap();
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref HEADING: Selector = Selector::parse("h1").unwrap();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Failed to fetch news from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Create a configured HTTP client for fetching articles
pub fn create_client(config: &FetchConfig) -> Result<Client, ScraperError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()
        .map_err(ScraperError::Client)
}

/// GET a page and return its decoded body. Non-2xx statuses are failures.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, ScraperError> {
    let wrap = |source: reqwest::Error| ScraperError::Fetch {
        url: url.to_string(),
        source,
    };

    tracing::debug!("fetching {url}");
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(wrap)?;
    response.text().await.map_err(wrap)
}

/// Fetch a URL and extract its paragraph text. An empty extraction is not an error.
pub async fn fetch_article(client: &Client, url: &str) -> Result<Article, ScraperError> {
    let html = fetch_html(client, url).await?;
    let document = Html::parse_document(&html);

    let text = extract_paragraphs(&document);
    tracing::info!("extracted {} characters from {url}", text.len());

    Ok(Article {
        url: Some(url.to_string()),
        title: extract_title(&document),
        text,
    })
}

/// Concatenate the text of every `<p>` in document order, joined by single spaces
pub fn extract_paragraphs(document: &Html) -> String {
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the page title from <title> or <h1>
pub fn extract_title(document: &Html) -> Option<String> {
    [&*TITLE, &*HEADING].into_iter().find_map(|sel| {
        let element = document.select(sel).next()?;
        let title: String = element.text().collect();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

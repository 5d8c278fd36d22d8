//! Values that flow through one summarisation request.

/// Where the article text comes from. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleSource {
    Url(String),
    RawText(String),
}

impl ArticleSource {
    /// True when the user supplied nothing to work with
    pub fn is_blank(&self) -> bool {
        match self {
            ArticleSource::Url(url) => url.trim().is_empty(),
            ArticleSource::RawText(text) => text.trim().is_empty(),
        }
    }
}

/// Text extracted from an article, ready for the summarizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// The original URL, if the text was fetched
    pub url: Option<String>,
    /// Page title
    pub title: Option<String>,
    /// Paragraph text, possibly empty
    pub text: String,
}

impl Article {
    pub fn from_raw(text: impl Into<String>) -> Self {
        Self {
            url: None,
            title: None,
            text: text.into(),
        }
    }

    /// True when there is no text worth sending to the model
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A non-empty, trimmed LLM summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
}

impl Summary {
    /// Name of the file offered for download
    pub const FILE_NAME: &'static str = "summary.txt";

    /// Build a summary from a raw model response. Returns `None` when the
    /// response is blank.
    pub fn from_response(response: &str) -> Option<Self> {
        let text = response.trim();
        (!text.is_empty()).then(|| Self {
            text: text.to_string(),
        })
    }

    /// Bytes of the downloadable `summary.txt`
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

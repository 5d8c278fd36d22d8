//! Browser front-end using axum.
//!
//! One page with a URL / raw-text mode selector, a "Generate Summary" action,
//! the summary with a `summary.txt` download, and a floating read-aloud button.
//! Session state is process-wide and overwritten on every request.

use crate::pipeline::Pipeline;
use crate::speech::Speaker;
use crate::summary::{Article, ArticleSource, Summary};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

const PROMPT_FOR_INPUT: &str = "Please enter a news URL or paste raw text above.";
const EMPTY_SUMMARY: &str = "Summary is empty. Try again.";

/// Where the page is in its request cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PresenterState {
    #[default]
    NoInput,
    InputPresent {
        article: Article,
    },
    SummaryPresent {
        article: Article,
        summary: Summary,
    },
}

impl PresenterState {
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            PresenterState::SummaryPresent { summary, .. } => Some(summary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A message rendered above the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Drives [`PresenterState`] for the single browser session.
pub struct Presenter {
    pipeline: Pipeline,
    state: PresenterState,
}

impl Presenter {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: PresenterState::NoInput,
        }
    }

    pub fn state(&self) -> &PresenterState {
        &self.state
    }

    /// Accept new input. Any previous summary is dropped.
    pub async fn submit(&mut self, source: ArticleSource) -> Vec<Notice> {
        self.state = PresenterState::NoInput;
        if source.is_blank() {
            return vec![Notice::new(Level::Info, PROMPT_FOR_INPUT)];
        }

        let resolved = match self.pipeline.resolve(&source).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!("{e}");
                return vec![Notice::new(
                    Level::Error,
                    format!("Failed to fetch or parse the URL. Error: {e}"),
                )];
            }
        };

        let mut notices = Vec::new();
        if let Some(advisory) = resolved.advisory {
            notices.push(Notice::new(Level::Warning, advisory.message()));
        }

        if resolved.article.is_empty() {
            notices.push(Notice::new(Level::Info, PROMPT_FOR_INPUT));
        } else {
            self.state = PresenterState::InputPresent {
                article: resolved.article,
            };
        }
        notices
    }

    /// Summarize the current input. Only meaningful in `InputPresent`.
    pub async fn generate(&mut self) -> Vec<Notice> {
        let article = match &self.state {
            PresenterState::InputPresent { article } => article.clone(),
            PresenterState::SummaryPresent { .. } => return Vec::new(),
            PresenterState::NoInput => return vec![Notice::new(Level::Info, PROMPT_FOR_INPUT)],
        };

        match self.pipeline.summarize(&article.text).await {
            Ok(Some(summary)) => {
                self.state = PresenterState::SummaryPresent { article, summary };
                Vec::new()
            }
            Ok(None) => vec![Notice::new(Level::Warning, EMPTY_SUMMARY)],
            Err(e) => {
                tracing::error!("summarize failed: {e}");
                vec![Notice::new(
                    Level::Error,
                    format!("Error generating summary: {e}"),
                )]
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    presenter: Arc<Mutex<Presenter>>,
    speaker: Speaker,
}

impl AppState {
    pub fn new(pipeline: Pipeline, speaker: Speaker) -> Self {
        Self {
            presenter: Arc::new(Mutex::new(Presenter::new(pipeline))),
            speaker,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Url,
    Raw,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    mode: Mode,
}

#[derive(Debug, Deserialize)]
struct SummarizeForm {
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    url: String,
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct SimpleResponse {
    status: &'static str,
}

/// Build the axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_page))
        .route("/summarize", post(handle_summarize))
        .route("/summary.txt", get(handle_download))
        .route("/read-aloud", post(handle_read_aloud))
        .with_state(state)
}

/// Serve the browser front-end until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("newsbrief listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

// --- Handlers ---

async fn handle_page(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let presenter = state.presenter.lock().await;
    let notices = match presenter.state() {
        PresenterState::NoInput => vec![Notice::new(Level::Info, PROMPT_FOR_INPUT)],
        _ => Vec::new(),
    };
    Html(render_page(query.mode, "", "", presenter.state(), &notices))
}

async fn handle_summarize(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> Html<String> {
    let source = match form.mode {
        Mode::Url => ArticleSource::Url(form.url.clone()),
        Mode::Raw => ArticleSource::RawText(form.text.clone()),
    };

    let mut presenter = state.presenter.lock().await;
    let mut notices = presenter.submit(source).await;
    if matches!(presenter.state(), PresenterState::InputPresent { .. }) {
        notices.extend(presenter.generate().await);
    }

    Html(render_page(
        form.mode,
        &form.url,
        &form.text,
        presenter.state(),
        &notices,
    ))
}

async fn handle_download(State(state): State<AppState>) -> Response {
    let presenter = state.presenter.lock().await;
    match presenter.state().summary() {
        Some(summary) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", Summary::FILE_NAME),
                ),
            ],
            summary.as_bytes().to_vec(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no summary yet").into_response(),
    }
}

async fn handle_read_aloud(State(state): State<AppState>) -> Response {
    let text = {
        let presenter = state.presenter.lock().await;
        presenter.state().summary().map(|s| s.text.clone())
    };

    match text {
        Some(text) => {
            // Fire-and-forget; the speaker serialises overlapping requests.
            state.speaker.speak(text);
            (StatusCode::ACCEPTED, Json(SimpleResponse { status: "speaking" })).into_response()
        }
        None => (StatusCode::CONFLICT, Json(SimpleResponse { status: "no summary" })).into_response(),
    }
}

// --- Rendering ---

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_notice(notice: &Notice) -> String {
    let class = match notice.level {
        Level::Info => "info",
        Level::Warning => "warning",
        Level::Error => "error",
    };
    format!(
        "<div class=\"notice {class}\">{}</div>\n",
        escape(&notice.message)
    )
}

fn render_page(
    mode: Mode,
    url: &str,
    text: &str,
    state: &PresenterState,
    notices: &[Notice],
) -> String {
    let (url_checked, raw_checked) = match mode {
        Mode::Url => (" class=\"active\"", ""),
        Mode::Raw => ("", " class=\"active\""),
    };

    let input = match mode {
        Mode::Url => format!(
            "<input type=\"hidden\" name=\"mode\" value=\"url\">\n\
             <label>Enter News Article URL<input type=\"url\" name=\"url\" value=\"{}\"></label>",
            escape(url)
        ),
        Mode::Raw => format!(
            "<input type=\"hidden\" name=\"mode\" value=\"raw\">\n\
             <label>Paste your news article here<textarea name=\"text\" rows=\"12\">{}</textarea></label>",
            escape(text)
        ),
    };

    let notices: String = notices.iter().map(render_notice).collect();

    let summary = match state.summary() {
        Some(summary) => format!(
            "<section class=\"summary\">\n<h2>🧾 AI-Generated Summary</h2>\n<p>{}</p>\n\
             <a class=\"download\" href=\"/summary.txt\" download=\"{}\">📥 Download Summary</a>\n</section>\n\
             <button class=\"read-btn\" title=\"Read Aloud\" \
             onclick=\"fetch('/read-aloud', {{method: 'POST'}})\">🔊</button>\n",
            escape(&summary.text),
            Summary::FILE_NAME
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>📰 AI News Summarizer</title>
<style>
body {{ font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }}
nav a {{ margin-right: 1rem; }}
nav a.active {{ font-weight: bold; }}
label {{ display: block; margin: 1rem 0; }}
input[type=url], textarea {{ display: block; width: 100%; }}
.notice {{ padding: .6rem; margin: .6rem 0; border-radius: 4px; }}
.info {{ background: #e8f0fe; }}
.warning {{ background: #fff4e5; }}
.error {{ background: #fdecea; }}
.read-btn {{ position: fixed; bottom: 30px; right: 30px; background: #ff4b4b; color: white;
  border: none; padding: 15px 20px; border-radius: 50px; font-size: 20px; cursor: pointer; }}
</style>
</head>
<body>
<h1>🗞️ AI News Summarizer</h1>
<p>Enter a <strong>news article URL</strong> or paste <strong>raw news text</strong>, and get a smart AI summary.</p>
<nav>Input Type: <a href="/?mode=url"{url_checked}>URL</a><a href="/?mode=raw"{raw_checked}>Raw Text</a></nav>
<form method="post" action="/summarize">
{input}
<button type="submit">🧠 Generate Summary</button>
</form>
{notices}{summary}</body>
</html>
"#
    )
}

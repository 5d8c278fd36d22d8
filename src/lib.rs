//! # newsbrief
//!
//! Fetch a news article, or take pasted text, and summarise it with Google Gemini.
//!
//! ## Front-ends
//!
//! - **Command line**: summarise one URL and print the result
//! - **Browser**: URL or raw-text input, `summary.txt` download, read aloud
//!
//! Both share one [`Pipeline`]: fetch with reqwest, keep every `<p>` via
//! scraper, then send a fixed prompt to the model.

pub mod agent;
pub mod config;
pub mod pipeline;
pub mod scraper;
pub mod speech;
pub mod summary;
pub mod ui;

pub use config::Config;
pub use pipeline::{Outcome, Pipeline};
pub use summary::{Article, ArticleSource, Summary};

//! newsbrief CLI - news article summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use dialoguer::Input;
use newsbrief::speech::Speaker;
use newsbrief::ui::{self, AppState};
use newsbrief::{ArticleSource, Config, Outcome, Pipeline};
use std::io::{BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "newsbrief")]
#[command(author, version, about = "Summarise news articles with an LLM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a news article by URL (prompts when no URL is given)
    Summarise {
        /// URL of the article
        url: Option<String>,
        /// Show the extracted text instead of a summary
        #[arg(long)]
        raw: bool,
    },
    /// Run the browser front-end
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:8501
        #[arg(long)]
        addr: Option<String>,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Summarise { url, raw }) => summarise(url, raw).await?,
        None => summarise(None, false).await?,
        Some(Commands::Serve { addr }) => {
            let config = Config::load()?;
            let addr = addr.unwrap_or_else(|| config.web.addr.clone());
            let speaker = Speaker::from_config(&config.speech);
            let pipeline = Pipeline::from_config(config)?;

            ui::serve(AppState::new(pipeline, speaker), &addr).await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "newsbrief", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries the summary.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn summarise(url: Option<String>, raw: bool) -> anyhow::Result<()> {
    // A missing API key must stop us before we ask for anything.
    let config = Config::load()?;
    let pipeline = Pipeline::from_config(config)?;

    let url = match url {
        Some(url) => url.trim().to_string(),
        None if std::io::stdin().is_terminal() => Input::<String>::new()
            .with_prompt("Please enter your URL")
            .interact_text()?
            .trim()
            .to_string(),
        None => read_url(std::io::stdin().lock())?,
    };

    println!("\nFetching news from: {}", url);

    if raw {
        match pipeline.resolve(&ArticleSource::Url(url.clone())).await {
            Ok(resolved) => {
                let title = resolved.article.title.as_deref().unwrap_or("No title");
                println!("\n=== {} ===\n", title);
                println!("{}", resolved.article.text);
                println!("\n--- Extracted {} characters ---", resolved.article.text.len());
            }
            Err(e) => println!("{}", e),
        }
        return Ok(());
    }

    let result = match pipeline.run(&url).await {
        Ok(Outcome::Summary(summary)) => summary.text,
        Ok(Outcome::FetchFailed(message)) => message,
        Ok(Outcome::NoText(advisory)) => advisory.message().yellow().to_string(),
        Ok(Outcome::EmptySummary) => "Summary is empty. Try again.".yellow().to_string(),
        Err(e) => format!("Error generating summary: {}", e).red().to_string(),
    };

    println!("\n🔗 {}\n📝 Summary:\n{}", url, result);
    Ok(())
}

/// Read one URL from piped input. An empty stream yields an empty URL.
fn read_url(mut input: impl BufRead) -> std::io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

//! Highlight Locator CLI
//!
//! Loads a JSON document description, runs a search or resolves backend
//! highlights, and prints the result as JSON on stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use highlight_locator::config::Config;
use highlight_locator::document::MemoryDocument;
use highlight_locator::highlight::{parse_backend_payload, resolve_backend_highlights, Highlight};
use highlight_locator::search::SearchEngine;

#[derive(Parser)]
#[command(
    name = "highlight-locator",
    version,
    about = "Locate text in a document and print highlight geometry"
)]
struct Cli {
    /// JSON document description
    #[arg(short, long)]
    document: PathBuf,

    /// Viewport scale (overrides LOCATOR_SCALE)
    #[arg(long)]
    scale: Option<f64>,

    /// Maximum number of matches (overrides LOCATOR_MAX_RESULTS)
    #[arg(long)]
    max_results: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the whole document, or a single page
    Search {
        query: String,
        #[arg(short, long)]
        page: Option<u32>,
        /// Print highlights built from the matches instead of raw matches
        #[arg(long)]
        highlights: bool,
    },
    /// Resolve backend highlight records into positioned highlights
    Highlights {
        /// JSON file: `{"highlights": [...]}` or a bare array
        file: PathBuf,
    },
    /// Print the extracted text of a page
    Text { page: u32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "highlight_locator=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });
    if let Some(scale) = cli.scale {
        config.search.scale = scale;
    }
    if let Some(max_results) = cli.max_results {
        config.search.max_results = max_results;
    }
    config.search.validate()?;

    let document = MemoryDocument::from_path(&cli.document)
        .with_context(|| format!("Failed to load document {}", cli.document.display()))?;
    tracing::info!(
        "Loaded document from {} ({} pages)",
        cli.document.display(),
        highlight_locator::PdfDocument::num_pages(&document)
    );

    let engine = SearchEngine::with_config(Arc::new(document), config.search);

    match cli.command {
        Command::Search {
            query,
            page,
            highlights,
        } => {
            let results = match page {
                Some(page) => engine.search_page(page, &query).await,
                None => engine.search_text(&query).await,
            };
            tracing::info!("Found {} matches for {:?}", results.len(), query);
            if highlights {
                let highlights: Vec<Highlight> =
                    results.iter().map(Highlight::from_match).collect();
                print_json(&highlights, cli.pretty)?;
            } else {
                print_json(&results, cli.pretty)?;
            }
        }
        Command::Highlights { file } => {
            let body = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let records = parse_backend_payload(&body).context("Invalid highlight payload")?;
            let highlights = resolve_backend_highlights(&engine, &records).await;
            tracing::info!("Resolved {} of {} highlights", highlights.len(), records.len());
            print_json(&highlights, cli.pretty)?;
        }
        Command::Text { page } => {
            let text = engine
                .load_page_text(page)
                .await
                .with_context(|| format!("No text available for page {}", page))?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

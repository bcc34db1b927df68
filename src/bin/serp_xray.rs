//! CLI for serp-xray.
//!
//! Runs one analysis and prints the outcome as pretty JSON on stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serp_xray::{AnalysisOutcome, Analyzer, Options};
use tracing_subscriber::EnvFilter;

/// Profile the top-ranking pages for a search query.
#[derive(Parser)]
#[command(name = "serp_xray", version, about)]
struct Cli {
    /// Search query to analyse.
    keyword: String,

    /// Number of valid pages to analyse (overrides the config file).
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=100))]
    pages: Option<u16>,

    /// Path to a TOML options file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log skipped candidates and clustering decisions.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "serp_xray=debug" } else { "serp_xray=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let mut options = match &cli.config {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    if let Some(pages) = cli.pages {
        options.target_pages = usize::from(pages);
    }
    options.serp.api_key = std::env::var("SERPER_API_KEY").context("SERPER_API_KEY is not set")?;

    let analyzer = Analyzer::from_options(options)?;
    let outcome = analyzer.run(cli.keyword.trim());

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    match outcome {
        AnalysisOutcome::Complete(_) => Ok(()),
        AnalysisOutcome::NoResults { reason } => {
            tracing::warn!(%reason, "no results");
            Ok(())
        }
        AnalysisOutcome::NoValidPages { skipped } => {
            tracing::warn!(skipped = skipped.len(), "no page could be analysed");
            Ok(())
        }
    }
}

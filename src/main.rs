//! Sitemaps main entry point
//!
//! Command-line interface: crawls a site and prints the discovered URLs.

use anyhow::Context;
use clap::Parser;
use sitemaps::config::{load_config, validate, Config};
use sitemaps::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemaps: discover every URL under a root URL
///
/// Crawls the root URL and every page it links to under the same prefix,
/// then prints the sorted list of fetched URLs, one per line.
#[derive(Parser, Debug)]
#[command(name = "sitemaps")]
#[command(version)]
#[command(about = "Discover every URL under a root URL", long_about = None)]
struct Cli {
    /// Root URL to crawl (overrides `root-url` from the config file)
    #[arg(value_name = "ROOT_URL")]
    root_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Replace the origin of every printed URL with this URL's origin
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Skip URLs under this path, relative to the root URL (repeatable)
    #[arg(long, value_name = "PATH")]
    ignore: Vec<String>,

    /// Maximum number of simultaneous requests
    #[arg(long, value_name = "N")]
    max_concurrency: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    tracing::info!("Crawling {}", config.crawler.root_url);
    let urls = match run_crawl(&config).await {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    for url in &urls {
        println!("{}", url);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemaps=info,warn"),
            1 => EnvFilter::new("sitemaps=debug,info"),
            2 => EnvFilter::new("sitemaps=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges the config file (if any) with command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, &cli.root_url) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        (None, Some(root_url)) => Config::new(root_url.clone()),
        (None, None) => anyhow::bail!("a ROOT_URL argument or --config file is required"),
    };

    if let Some(root_url) = &cli.root_url {
        config.crawler.root_url = root_url.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = Some(base_url.clone());
    }
    if !cli.ignore.is_empty() {
        config.crawler.ignore = cli.ignore.clone();
    }
    if let Some(max_concurrency) = cli.max_concurrency {
        config.crawler.max_concurrency = max_concurrency;
    }

    validate(&config).context("invalid configuration")?;

    Ok(config)
}

//! Crawl coordinator - main crawl orchestration logic
//!
//! This module wires the pieces of a crawl together:
//! - Resolving the root, base and ignore URLs
//! - Building shared state, the concurrency limiter and the task scope
//! - Seeding the frontier with the root URL
//! - Waiting for every transitively spawned fetch to finish
//! - Sorting and rewriting the results

use crate::config::{validate, Config, HttpConfig, DEFAULT_MAX_CONCURRENCY};
use crate::crawler::fetcher::{HttpTransport, Transport};
use crate::crawler::frontier::{Admission, Frontier};
use crate::crawler::processor::process_page;
use crate::crawler::scope::{Spawner, TaskScope};
use crate::state::TraversalState;
use crate::url::{parse_root, replace_root, CrawlScope};
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use url::Url;

/// Parameters of a single crawl
///
/// # Example
///
/// ```no_run
/// use sitemaps::crawler::{crawl, CrawlOptions};
///
/// # async fn example() -> Result<(), sitemaps::CrawlError> {
/// let urls = crawl(
///     CrawlOptions::new("http://localhost:8000/")
///         .base_url("https://example.com")
///         .ignore(["/admin"])
///         .max_concurrency(10),
/// )
/// .await?;
///
/// for url in urls {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CrawlOptions {
    root_url: String,
    base_url: Option<String>,
    ignore: Vec<String>,
    transport: Option<Arc<dyn Transport>>,
    http: HttpConfig,
    max_concurrency: usize,
}

impl CrawlOptions {
    /// Creates options for crawling from `root_url`
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            base_url: None,
            ignore: Vec::new(),
            transport: None,
            http: HttpConfig::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Rewrites the origin of every result URL to the origin of `base_url`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Skips URLs starting with these patterns, resolved against the root URL
    pub fn ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Uses `transport` instead of building an HTTP client for the crawl
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Settings for the HTTP client built when no transport is supplied
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Caps the number of simultaneous fetches
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

impl From<&Config> for CrawlOptions {
    fn from(config: &Config) -> Self {
        let mut options = CrawlOptions::new(config.crawler.root_url.clone())
            .ignore(config.crawler.ignore.iter().cloned())
            .http(config.http.clone())
            .max_concurrency(config.crawler.max_concurrency);
        if let Some(base_url) = &config.crawler.base_url {
            options = options.base_url(base_url.clone());
        }
        options
    }
}

/// State shared by every task of one crawl
pub(crate) struct CrawlContext {
    pub(crate) frontier: Frontier,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) limiter: Semaphore,
    spawner: Spawner,
}

impl CrawlContext {
    /// Runs frontier admission on `link` and schedules a fetch if admitted
    ///
    /// Does not wait for the fetch. Returns true if a fetch was scheduled.
    pub(crate) fn admit(self: &Arc<Self>, link: &str, page: Option<&Url>) -> bool {
        match self.frontier.consider(link, page) {
            Admission::Admitted(url) => {
                tracing::debug!("Admitted {}", url);
                self.spawner.spawn(process_page(Arc::clone(self), url))
            }
            rejected => {
                tracing::trace!("Skipping link {:?}: {:?}", link, rejected);
                false
            }
        }
    }
}

/// Crawls every URL reachable from the root URL within its prefix
///
/// Returns the fetched URLs sorted lexicographically, with their origin
/// replaced by the base URL's origin when one is set.
///
/// The crawl is all-or-nothing: the first transport error aborts every
/// outstanding fetch and is returned without partial results.
///
/// # Arguments
///
/// * `options` - Root URL and crawl parameters
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Sorted, duplicate-free result URLs
/// * `Err(CrawlError)` - Invalid options, or a fetch failed
pub async fn crawl(options: CrawlOptions) -> Result<Vec<String>, CrawlError> {
    if options.max_concurrency < 1 || options.max_concurrency > Semaphore::MAX_PERMITS {
        return Err(CrawlError::InvalidOptions(format!(
            "max_concurrency must be between 1 and {}, got {}",
            Semaphore::MAX_PERMITS,
            options.max_concurrency
        )));
    }

    let root = parse_root(&options.root_url)?;
    let base = options.base_url.as_deref().map(parse_root).transpose()?;
    let scope = CrawlScope::new(&root, &options.ignore)?;

    // The transport lives as long as the context; an owned client is dropped
    // once the last task finishes.
    let transport: Arc<dyn Transport> = match options.transport {
        Some(transport) => transport,
        None => Arc::new(HttpTransport::new(&options.http)?),
    };

    tracing::info!(
        "Starting crawl of {} (max concurrency: {}, ignoring: {:?})",
        scope.root(),
        options.max_concurrency,
        scope.ignore_prefixes()
    );

    let start_time = Instant::now();
    let state = Arc::new(TraversalState::new());
    let tasks = TaskScope::new();

    let ctx = Arc::new(CrawlContext {
        frontier: Frontier::new(scope, Arc::clone(&state)),
        transport,
        limiter: Semaphore::new(options.max_concurrency),
        spawner: tasks.spawner(),
    });

    ctx.admit(root.as_str(), None);
    drop(ctx);

    let fetched = match tasks.join().await {
        Ok(fetched) => fetched,
        Err(e) => {
            tracing::error!("Crawl of {} aborted: {}", root, e);
            return Err(e);
        }
    };

    tracing::info!(
        "Crawl completed: {} tasks run, {} pages fetched, {} URLs discovered in {:?}",
        fetched,
        state.result_count(),
        state.discovered_count(),
        start_time.elapsed()
    );

    let mut results = state.sorted_results();
    if let Some(base) = base {
        results = results
            .iter()
            .map(|url| match Url::parse(url) {
                Ok(parsed) => replace_root(&parsed, &base),
                Err(_) => url.clone(),
            })
            .collect();
        results.sort();
    }

    Ok(results)
}

/// Runs a crawl from a configuration
///
/// The configuration is validated first, so a `Config` assembled in code is
/// held to the same rules as one loaded from a file.
///
/// # Example
///
/// ```no_run
/// use sitemaps::config::load_config;
/// use sitemaps::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("sitemaps.toml"))?;
/// let urls = run_crawl(&config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<Vec<String>, CrawlError> {
    validate(config)?;
    crawl(CrawlOptions::from(config)).await
}

use serde::Deserialize;

/// Default cap on simultaneously in-flight fetches
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

/// Default total request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawl target and traversal limits
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Entry point and scope anchor of the crawl
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Origin substituted into every result URL
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,

    /// Path prefixes to skip, relative to the root URL
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Maximum number of simultaneous fetches
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

/// HTTP client settings for the built-in transport
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

impl Config {
    /// Creates a configuration for `root_url` with every other value defaulted
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            crawler: CrawlerConfig {
                root_url: root_url.into(),
                base_url: None,
                ignore: Vec::new(),
                max_concurrency: DEFAULT_MAX_CONCURRENCY,
            },
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

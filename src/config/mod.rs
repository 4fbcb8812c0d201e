//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitemaps::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemaps.toml")).unwrap();
//! println!("Crawling from: {}", config.crawler.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;

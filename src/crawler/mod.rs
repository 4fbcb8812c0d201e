//! Crawler module for concurrent URL discovery
//!
//! This module contains the core crawling logic, including:
//! - The `Transport` seam and its reqwest implementation
//! - Regex-based link extraction
//! - Frontier admission (scope, ignore and dedup filters)
//! - The page processor and the fork-join task scope
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod processor;
mod scope;

pub use coordinator::{crawl, run_crawl, CrawlOptions};
pub use fetcher::{build_http_client, HttpTransport, Response, Transport};
pub use frontier::{Admission, Frontier};
pub use parser::extract_links;
pub use scope::{Spawner, TaskScope};

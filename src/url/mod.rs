//! URL handling module
//!
//! This module provides link resolution, crawl scope matching and origin
//! rewriting for result URLs.

mod matcher;
mod resolve;
mod rewrite;

// Re-export main functions
pub use matcher::CrawlScope;
pub use resolve::{parse_root, resolve_link};
pub use rewrite::replace_root;

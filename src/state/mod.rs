//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TraversalState`: the discovered-set and result-set shared by every
//!   task of a single crawl

mod traversal;

// Re-export main types
pub use traversal::TraversalState;

//! Shared traversal state for one crawl
//!
//! Both sets only grow. Every mutation is a single check-and-insert under a
//! lock that is never held across an `.await`, so two tasks racing on the
//! same URL cannot both admit it.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Discovered and fetched URLs for a crawl
///
/// Invariant: every URL in the result set is also in the discovered set.
#[derive(Debug, Default)]
pub struct TraversalState {
    /// Every URL ever admitted to the fetch pipeline
    discovered: Mutex<HashSet<String>>,

    /// Every URL that has been fetched
    results: Mutex<HashSet<String>>,
}

impl TraversalState {
    /// Creates empty traversal state
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as discovered
    ///
    /// Returns true if the URL was not known before. At most one caller ever
    /// gets `true` for a given URL.
    pub fn discover(&self, url: &str) -> bool {
        let mut discovered = lock(&self.discovered);
        if discovered.contains(url) {
            return false;
        }
        discovered.insert(url.to_string())
    }

    /// Returns true if the URL has been discovered
    pub fn is_discovered(&self, url: &str) -> bool {
        lock(&self.discovered).contains(url)
    }

    /// Records a fetched URL
    ///
    /// URLs that were never discovered are refused so the result set stays a
    /// subset of the discovered set. Returns true if the URL was newly added.
    pub fn record_result(&self, url: &str) -> bool {
        if !self.is_discovered(url) {
            tracing::warn!("Refusing to record undiscovered URL as result: {}", url);
            return false;
        }
        lock(&self.results).insert(url.to_string())
    }

    /// Number of discovered URLs
    pub fn discovered_count(&self) -> usize {
        lock(&self.discovered).len()
    }

    /// Number of fetched URLs
    pub fn result_count(&self) -> usize {
        lock(&self.results).len()
    }

    /// Returns the fetched URLs in lexicographic order
    pub fn sorted_results(&self) -> Vec<String> {
        let mut results: Vec<String> = lock(&self.results).iter().cloned().collect();
        results.sort();
        results
    }
}

// The sets stay consistent even if a holder panicked: each critical section is
// a single insert or read.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

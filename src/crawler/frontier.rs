//! Frontier admission
//!
//! Decides whether a link found on a page enters the fetch pipeline. Filters
//! run in order and the first one that matches wins:
//! 1. Link does not resolve to a URL
//! 2. URL is outside the root prefix
//! 3. URL starts with an ignore prefix
//! 4. URL was already discovered
//!
//! Rejections are not errors. Acceptance marks the URL as discovered in the
//! same step as the membership check.

use crate::state::TraversalState;
use crate::url::{resolve_link, CrawlScope};
use std::sync::Arc;
use url::Url;

/// Outcome of considering a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// New in-scope URL; the caller must schedule a fetch for it
    Admitted(Url),
    /// Link could not be resolved to an absolute URL
    Unresolvable,
    /// URL does not start with the root URL
    OutOfScope,
    /// URL starts with an ignore prefix
    Ignored,
    /// URL was admitted before
    AlreadyDiscovered,
}

impl Admission {
    /// Returns true if the link was admitted
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }
}

/// Admission filter over a crawl scope and the shared discovered-set
#[derive(Debug)]
pub struct Frontier {
    scope: CrawlScope,
    state: Arc<TraversalState>,
}

impl Frontier {
    pub fn new(scope: CrawlScope, state: Arc<TraversalState>) -> Self {
        Self { scope, state }
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// Resolves `link` against `page` and applies the admission filters
    ///
    /// `page` is the URL of the page the link was found on, or `None` for the
    /// crawl seed, which must be absolute.
    pub fn consider(&self, link: &str, page: Option<&Url>) -> Admission {
        let Some(url) = resolve_link(link, page) else {
            return Admission::Unresolvable;
        };

        if !self.scope.contains(url.as_str()) {
            return Admission::OutOfScope;
        }

        if self.scope.is_ignored(url.as_str()) {
            return Admission::Ignored;
        }

        if !self.state.discover(url.as_str()) {
            return Admission::AlreadyDiscovered;
        }

        Admission::Admitted(url)
    }
}

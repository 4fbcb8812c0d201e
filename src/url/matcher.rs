use crate::url::resolve::resolve_link;
use crate::UrlError;
use url::Url;

/// Scope of a crawl: the root prefix and the ignored prefixes under it
///
/// Matching is a plain string-prefix test on serialized URLs:
/// 1. A URL is in scope only if it starts with the root URL
/// 2. A URL in scope is still rejected if it starts with any ignore prefix
#[derive(Debug, Clone)]
pub struct CrawlScope {
    root: String,
    ignore: Vec<String>,
}

impl CrawlScope {
    /// Builds a scope from a root URL and raw ignore patterns
    ///
    /// Each pattern is resolved against the root, so `"/private"` under a root
    /// of `http://ex.com/` ignores everything starting with
    /// `http://ex.com/private`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitemaps::url::CrawlScope;
    /// use url::Url;
    ///
    /// let root = Url::parse("http://ex.com/").unwrap();
    /// let scope = CrawlScope::new(&root, &["/private".to_string()]).unwrap();
    ///
    /// assert!(scope.admits("http://ex.com/public"));
    /// assert!(!scope.admits("http://ex.com/private/secret"));
    /// assert!(!scope.admits("http://other.com/"));
    /// ```
    pub fn new(root: &Url, ignore: &[String]) -> Result<Self, UrlError> {
        let ignore = ignore
            .iter()
            .map(|pattern| {
                resolve_link(pattern, Some(root))
                    .map(String::from)
                    .ok_or_else(|| UrlError::Parse(format!("Invalid ignore pattern: {}", pattern)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: root.to_string(),
            ignore,
        })
    }

    /// The root URL every in-scope URL starts with
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The resolved, absolute ignore prefixes
    pub fn ignore_prefixes(&self) -> &[String] {
        &self.ignore
    }

    /// Returns true if the URL lies under the root prefix
    pub fn contains(&self, url: &str) -> bool {
        url.starts_with(&self.root)
    }

    /// Returns true if the URL starts with an ignore prefix
    pub fn is_ignored(&self, url: &str) -> bool {
        self.ignore.iter().any(|prefix| url.starts_with(prefix))
    }

    /// Returns true if the URL is in scope and not ignored
    pub fn admits(&self, url: &str) -> bool {
        self.contains(url) && !self.is_ignored(url)
    }
}

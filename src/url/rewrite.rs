use url::{Position, Url};

/// Replaces the origin of `url` with the origin of `base`
///
/// Scheme, credentials, host and port come from `base`; path, query and
/// fragment come from `url`. The path of `base` is not used.
///
/// # Examples
///
/// ```
/// use sitemaps::url::replace_root;
/// use url::Url;
///
/// let url = Url::parse("http://example.com/a?x=1").unwrap();
/// let base = Url::parse("http://mirror.test/").unwrap();
/// assert_eq!(replace_root(&url, &base), "http://mirror.test/a?x=1");
/// ```
pub fn replace_root(url: &Url, base: &Url) -> String {
    format!("{}{}", &base[..Position::BeforePath], &url[Position::BeforePath..])
}

use crate::UrlError;
use url::Url;

/// Parses the crawl root URL
///
/// The root must be an absolute `http` or `https` URL that can act as a base
/// for relative references. The fragment is dropped, as for every resolved
/// link. The returned `Url` serializes to the canonical form used as the
/// scope anchor, so that resolved links and the anchor compare as plain
/// strings.
///
/// # Examples
///
/// ```
/// use sitemaps::url::parse_root;
///
/// let root = parse_root("http://EX.com/#top").unwrap();
/// assert_eq!(root.as_str(), "http://ex.com/");
/// ```
pub fn parse_root(root_url: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(root_url).map_err(|e| UrlError::Parse(format!("{}: {}", root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase(root_url.to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves a raw link to an absolute URL
///
/// Relative references are resolved against `page`, the URL of the page the
/// link was found on. Without a page the link must already be absolute. The
/// fragment is dropped since it never reaches the server.
///
/// Returns `None` if the link cannot be resolved.
///
/// # Examples
///
/// ```
/// use sitemaps::url::resolve_link;
/// use url::Url;
///
/// let page = Url::parse("http://ex.com/docs/").unwrap();
/// let url = resolve_link("intro#top", Some(&page)).unwrap();
/// assert_eq!(url.as_str(), "http://ex.com/docs/intro");
/// ```
pub fn resolve_link(link: &str, page: Option<&Url>) -> Option<Url> {
    let link = link.trim();

    let resolved = match page {
        Some(base) => base.join(link),
        None => Url::parse(link),
    };

    let mut url = resolved.ok()?;
    url.set_fragment(None);
    Some(url)
}

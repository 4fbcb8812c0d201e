//! Link extraction from raw HTML
//!
//! This is a textual scan, not an HTML parser: it finds `href=` attributes
//! anywhere in the body, with double-quoted, single-quoted or unquoted
//! values. A value ends at whitespace, a quote or an angle bracket.

use once_cell::sync::Lazy;
use regex::Regex;

static HREF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)href=["']?([^\s"'<>]+)"#).expect("href pattern is a valid regex")
});

/// Extracts every `href` value from an HTML body, in document order
///
/// Values are returned as written: relative links are not resolved and
/// duplicates are kept.
///
/// # Example
///
/// ```
/// use sitemaps::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a> <A HREF='/b'>B</A> <a href=/c>C</a>"#;
/// assert_eq!(extract_links(html), vec!["/a", "/b", "/c"]);
/// ```
pub fn extract_links(body: &str) -> Vec<&str> {
    HREF_PATTERN
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quoted() {
        let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
        assert_eq!(extract_links(html), vec!["/page"]);
    }

    #[test]
    fn test_single_quoted() {
        let html = r#"<a href='/page'>Link</a>"#;
        assert_eq!(extract_links(html), vec!["/page"]);
    }

    #[test]
    fn test_unquoted() {
        let html = r#"<a href=/page>Link</a> <a href=other class="x">"#;
        assert_eq!(extract_links(html), vec!["/page", "other"]);
    }

    #[test]
    fn test_case_insensitive() {
        let html = r#"<A HREF="/upper">x</A><a Href="/mixed">y</a>"#;
        assert_eq!(extract_links(html), vec!["/upper", "/mixed"]);
    }

    #[test]
    fn test_absolute_link() {
        let html = r#"<a href="https://other.com/page?x=1&amp;y=2">Link</a>"#;
        assert_eq!(
            extract_links(html),
            vec!["https://other.com/page?x=1&amp;y=2"]
        );
    }

    #[test]
    fn test_any_element_with_href() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <a href="/page">Page</a>
            <base href="/">
        "#;
        assert_eq!(extract_links(html), vec!["/style.css", "/page", "/"]);
    }

    #[test]
    fn test_no_links() {
        assert!(extract_links("<html><body><p>No links here</p></body></html>").is_empty());
        assert!(extract_links("").is_empty());
    }

    #[test]
    fn test_empty_href_skipped() {
        let html = r#"<a href="">empty</a><a href="/ok">ok</a>"#;
        assert_eq!(extract_links(html), vec!["/ok"]);
    }

    #[test]
    fn test_spaces_around_equals_not_matched() {
        let html = r#"<a href = "/spaced">x</a>"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_duplicates_kept() {
        let html = r#"<a href="/a">1</a><a href="/a">2</a>"#;
        assert_eq!(extract_links(html), vec!["/a", "/a"]);
    }
}

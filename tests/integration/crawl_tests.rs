//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the full
//! crawl cycle through the reqwest transport.

use sitemaps::config::{Config, HttpConfig};
use sitemaps::crawler::{crawl, run_crawl, CrawlOptions};
use sitemaps::CrawlError;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 200 response with an HTML body
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

/// Mounts a GET mock that must be hit exactly `times` times
async fn mount(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_linear_chain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(&mock_server, "/", html(r#"<a href="/a">A</a>"#), 1).await;
    mount(&mock_server, "/a", html(r#"<a href="/b">B</a>"#), 1).await;
    mount(&mock_server, "/b", html("<p>No links here</p>"), 1).await;

    let results = crawl(CrawlOptions::new(format!("{}/", base_url)))
        .await
        .expect("Crawl failed");

    assert_eq!(
        results,
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
        ]
    );
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Diamond with back-links: / -> a, b; a -> c, /; b -> c, a; c -> /, a, b
    mount(
        &mock_server,
        "/",
        html(r#"<a href="/a">a</a><a href="b">b</a>"#),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/a",
        html(r#"<a href="/c">c</a><a href="/">home</a>"#),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/b",
        html(&format!(r#"<a href="{}/c">c</a><a href='/a'>a</a>"#, base_url)),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/c",
        html(r#"<a href=/>home</a><A HREF="/a">a</A><a href="b">b</a>"#),
        1,
    )
    .await;

    let results = crawl(CrawlOptions::new(format!("{}/", base_url)).max_concurrency(2))
        .await
        .expect("Crawl failed");

    assert_eq!(results.len(), 4);
    // Mock expectations are verified when mock_server drops
}

#[tokio::test]
async fn test_out_of_scope_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/docs/",
        html(r#"<a href="intro">Intro</a><a href="/blog/">Blog</a><a href="http://other.invalid/">Other</a>"#),
        1,
    )
    .await;
    mount(&mock_server, "/docs/intro", html(r#"<a href="../">Up</a>"#), 1).await;
    mount(&mock_server, "/blog/", html("blog"), 0).await;
    mount(&mock_server, "/", html("home"), 0).await;

    let results = crawl(CrawlOptions::new(format!("{}/docs/", base_url)))
        .await
        .expect("Crawl failed");

    assert_eq!(
        results,
        vec![
            format!("{}/docs/", base_url),
            format!("{}/docs/intro", base_url),
        ]
    );
}

#[tokio::test]
async fn test_ignored_prefix_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        html(r#"<a href="/private/secret">Secret</a><a href="/public">Public</a>"#),
        1,
    )
    .await;
    mount(&mock_server, "/public", html("public"), 1).await;
    mount(&mock_server, "/private/secret", html("secret"), 0).await;

    let results = crawl(CrawlOptions::new(format!("{}/", base_url)).ignore(["/private"]))
        .await
        .expect("Crawl failed");

    assert_eq!(
        results,
        vec![format!("{}/", base_url), format!("{}/public", base_url)]
    );
}

#[tokio::test]
async fn test_non_html_is_leaf() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(&mock_server, "/", html(r#"<a href="/report.pdf">Report</a>"#), 1).await;
    mount(
        &mock_server,
        "/report.pdf",
        ResponseTemplate::new(200)
            .set_body_raw(r#"%PDF-1.4 href="/hidden""#.to_string(), "application/pdf"),
        1,
    )
    .await;
    mount(&mock_server, "/hidden", html("hidden"), 0).await;

    let results = crawl(CrawlOptions::new(format!("{}/", base_url)))
        .await
        .expect("Crawl failed");

    assert_eq!(
        results,
        vec![format!("{}/", base_url), format!("{}/report.pdf", base_url)]
    );
}

#[tokio::test]
async fn test_error_status_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(&mock_server, "/", html(r#"<a href="/gone">Gone</a>"#), 1).await;
    mount(
        &mock_server,
        "/gone",
        ResponseTemplate::new(404).set_body_raw(r#"<a href="/never">x</a>"#.to_string(), "text/html"),
        1,
    )
    .await;
    // Links on error pages are still followed
    mount(&mock_server, "/never", html("reached"), 1).await;

    let results = crawl(CrawlOptions::new(format!("{}/", base_url)))
        .await
        .expect("Crawl failed");

    assert_eq!(results.len(), 3);
    assert!(results.contains(&format!("{}/gone", base_url)));
}

#[tokio::test]
async fn test_base_url_rewrite() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        html(r#"<a href="/a?x=1">A</a><a href="/docs/">Docs</a>"#),
        1,
    )
    .await;
    mount(&mock_server, "/a", html(""), 1).await;
    mount(&mock_server, "/docs/", html(""), 1).await;

    let results = crawl(
        CrawlOptions::new(format!("{}/", base_url)).base_url("https://example.com"),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(
        results,
        vec![
            "https://example.com/",
            "https://example.com/a?x=1",
            "https://example.com/docs/",
        ]
    );
}

#[tokio::test]
async fn test_timeout_aborts_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(&mock_server, "/", html(r#"<a href="/slow">Slow</a>"#), 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("late").set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let http = HttpConfig {
        timeout_secs: 1,
        ..HttpConfig::default()
    };

    let result = crawl(CrawlOptions::new(format!("{}/", base_url)).http(http)).await;

    match result {
        Err(CrawlError::Timeout { url }) => assert_eq!(url, format!("{}/slow", base_url)),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_crawl_from_config() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        html(r#"<a href="/keep">Keep</a><a href="/skip/me">Skip</a>"#),
        1,
    )
    .await;
    mount(&mock_server, "/keep", html(""), 1).await;
    mount(&mock_server, "/skip/me", html(""), 0).await;

    let mut config = Config::new(format!("{}/", base_url));
    config.crawler.ignore = vec!["skip/".to_string()];
    config.crawler.max_concurrency = 1;

    let results = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(
        results,
        vec![format!("{}/", base_url), format!("{}/keep", base_url)]
    );
}

//! Page processor
//!
//! Fetches one admitted URL under a limiter permit, feeds the links of HTML
//! responses back to frontier admission, and records the URL as a result.

use crate::crawler::coordinator::CrawlContext;
use crate::crawler::parser::extract_links;
use crate::CrawlError;
use std::sync::Arc;
use url::Url;

/// Processes a single admitted URL
///
/// The permit is held until this function returns, on every path. Transport
/// errors are returned as-is so that the task scope aborts the crawl. The URL
/// is recorded whatever the status code or content type.
pub(crate) async fn process_page(ctx: Arc<CrawlContext>, url: Url) -> Result<(), CrawlError> {
    let _permit = ctx
        .limiter
        .acquire()
        .await
        .map_err(|_| CrawlError::TaskFailed("concurrency limiter closed".to_string()))?;

    tracing::debug!("Fetching {}", url);
    let response = ctx.transport.get(url.as_str()).await?;

    if response.is_html() {
        let links = extract_links(&response.body);
        tracing::debug!("Found {} links on {}", links.len(), url);

        let mut admitted = 0;
        for link in links {
            if ctx.admit(link, Some(&url)) {
                admitted += 1;
            }
        }
        tracing::trace!("Admitted {} new URLs from {}", admitted, url);
    } else {
        tracing::debug!(
            "Not scanning {} for links (content-type: {:?})",
            url,
            response.content_type()
        );
    }

    ctx.frontier.state().record_result(url.as_str());

    Ok(())
}

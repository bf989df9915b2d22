//! Pre-publish link verification.
//!
//! Probes every download URL the page will carry, plus every external
//! changelog URL, and collects the broken ones. Internal changelog paths are
//! same-origin and cannot be resolved from the builder, so they are skipped.

use futures_util::{StreamExt, stream};
use log::{debug, info};

use crate::catalog::Catalog;
use crate::http::HttpClient;

/// Default number of probes in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// What a checked URL is used for on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Download,
    Article,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkKind::Download => write!(f, "download"),
            LinkKind::Article => write!(f, "article"),
        }
    }
}

/// One URL that did not check out, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub kind: LinkKind,
    pub url: String,
    /// HTTP status for a reachable-but-failing URL, `None` for a network error.
    pub status: Option<u16>,
    pub detail: String,
}

impl std::fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} link {}: {}", self.kind, self.url, self.detail)
    }
}

/// Every URL the rendered page will point at, in page order.
pub fn collect_urls(catalog: &Catalog, base_url: &str) -> Vec<(LinkKind, String)> {
    let mut urls = Vec::new();
    for release in catalog.all_releases() {
        if release.article_link.is_external() {
            urls.push((LinkKind::Article, release.article_link.as_str().to_string()));
        }
        for file in &release.files {
            urls.push((
                LinkKind::Download,
                file.download_url(base_url, &release.version),
            ));
        }
    }
    urls
}

/// Probe the given URLs with bounded concurrency and return the broken ones.
///
/// A non-success status and a network failure both produce a [`BrokenLink`]
/// rather than aborting the run, so one broken artifact does not hide the
/// rest of the report.
#[tracing::instrument(skip(client, urls))]
pub async fn verify_links(
    client: &HttpClient,
    urls: Vec<(LinkKind, String)>,
    concurrency: usize,
) -> Vec<BrokenLink> {
    let total = urls.len();
    info!("Verifying {} links...", total);

    let broken: Vec<BrokenLink> = stream::iter(urls)
        .map(|(kind, url)| async move {
            match client.probe(&url).await {
                Ok(status) if status.is_success() => {
                    debug!("OK {} ({})", url, status.as_u16());
                    None
                }
                Ok(status) => Some(BrokenLink {
                    kind,
                    detail: format!("HTTP {}", status.as_u16()),
                    status: Some(status.as_u16()),
                    url,
                }),
                Err(e) => Some(BrokenLink {
                    kind,
                    detail: format!("{:#}", e),
                    status: None,
                    url,
                }),
            }
        })
        .buffered(concurrency.max(1))
        .filter_map(|result| async move { result })
        .collect()
        .await;

    info!("{}/{} links verified, {} broken", total - broken.len(), total, broken.len());
    broken
}

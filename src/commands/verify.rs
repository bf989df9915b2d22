//! Verify command: probe every published link before the page goes live.

use std::time::Duration;

use anyhow::Result;
use log::warn;

use crate::runtime::Runtime;
use crate::source::ManifestSpec;
use crate::verify::{collect_urls, verify_links};

use super::{build_http_client, load_catalog};

/// Check that every download URL and external changelog URL resolves.
///
/// Reports every broken link, then fails if there was any.
#[tracing::instrument(skip(runtime))]
pub async fn verify<R: Runtime>(
    runtime: &R,
    spec: &ManifestSpec,
    base_url: &str,
    concurrency: usize,
    timeout: Duration,
) -> Result<()> {
    let client = build_http_client(Some(timeout))?;
    let catalog = load_catalog(runtime, &client, spec).await?;

    let urls = collect_urls(&catalog, base_url);
    let total = urls.len();
    let broken = verify_links(&client, urls, concurrency).await;

    if broken.is_empty() {
        println!("All {} links OK", total);
        return Ok(());
    }

    for link in &broken {
        warn!("{}", link);
        println!("BROKEN {}", link);
    }
    anyhow::bail!("{} of {} links are broken", broken.len(), total)
}

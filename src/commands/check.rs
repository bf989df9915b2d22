//! Check command: validate a manifest without writing anything.

use anyhow::Result;

use crate::runtime::Runtime;
use crate::source::ManifestSpec;

use super::{build_http_client, load_catalog};

/// Assemble the catalog and report its shape; any assembly error fails the
/// command before a broken page could be published.
#[tracing::instrument(skip(runtime))]
pub async fn check<R: Runtime>(runtime: &R, spec: &ManifestSpec) -> Result<()> {
    let client = build_http_client(None)?;
    let catalog = load_catalog(runtime, &client, spec).await?;

    let total_files: usize = catalog.all_releases().map(|r| r.files.len()).sum();
    println!(
        "Manifest OK: latest {} ({}), {} older, {} experimental, {} files",
        catalog.latest.version,
        catalog.latest.release_date,
        catalog.older.len(),
        catalog.experimental.len(),
        total_files
    );
    Ok(())
}

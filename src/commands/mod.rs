//! Command implementations behind the CLI.

mod build;
mod check;
mod verify;

pub use build::build;
pub use check::check;
pub use verify::verify;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::catalog::Catalog;
use crate::http::HttpClient;
use crate::manifest::Manifest;
use crate::runtime::Runtime;
use crate::source::{ManifestSpec, fetch_manifest};

/// Build the HTTP client shared by manifest fetching and link probing.
pub fn build_http_client(timeout: Option<Duration>) -> Result<HttpClient> {
    let mut builder = Client::builder().user_agent("relpage-cli");
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to build HTTP client")?;
    Ok(HttpClient::new(client))
}

/// Fetch, parse, and assemble the catalog for a manifest location.
///
/// Any failure here is fatal for the command: a manifest either yields a
/// complete catalog or nothing is rendered.
pub(crate) async fn load_catalog<R: Runtime>(
    runtime: &R,
    client: &HttpClient,
    spec: &ManifestSpec,
) -> Result<Catalog> {
    let json = fetch_manifest(runtime, client, spec).await?;
    let manifest = Manifest::parse(&json)?;
    let catalog = Catalog::assemble(manifest)
        .with_context(|| format!("Invalid release manifest: {}", spec))?;
    Ok(catalog)
}

//! Build command: manifest in, download-page markup out.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::render::{RenderOptions, apply_shell, render};
use crate::runtime::Runtime;
use crate::source::ManifestSpec;

use super::{build_http_client, load_catalog};

/// Render the download page and write it to `out`.
///
/// Without `shell` the bare fragment is written; with `shell` the fragment is
/// spliced into the shell document at its marker and the full page is written.
#[tracing::instrument(skip(runtime, options))]
pub async fn build<R: Runtime>(
    runtime: &R,
    spec: &ManifestSpec,
    out: &Path,
    shell: Option<&Path>,
    options: &RenderOptions,
) -> Result<()> {
    let client = build_http_client(None)?;
    let catalog = load_catalog(runtime, &client, spec).await?;

    let fragment = render(&catalog, options);

    let output = match shell {
        Some(shell_path) => {
            let shell_text = runtime
                .read_to_string(shell_path)
                .with_context(|| format!("Failed to read page shell at {:?}", shell_path))?;
            apply_shell(&shell_text, &fragment)?
        }
        None => fragment,
    };

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() && !runtime.exists(parent) {
            runtime.create_dir_all(parent)?;
        }
    }
    runtime
        .write(out, output.as_bytes())
        .with_context(|| format!("Failed to write page to {:?}", out))?;

    info!(
        "Wrote download page for {} {} to {:?}",
        options.product, catalog.latest.version, out
    );
    Ok(())
}

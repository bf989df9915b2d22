//! Splicing the rendered fragment into a page shell.

use anyhow::{Result, bail};

/// Marker the page shell must contain where the fragment is spliced in.
pub const RELEASES_MARKER: &str = "<!-- relpage:releases -->";

/// Replace the marker in `shell` with `fragment`.
///
/// Only the first occurrence is replaced; a shell without the marker is a
/// build error rather than a silently unchanged page.
pub fn apply_shell(shell: &str, fragment: &str) -> Result<String> {
    if !shell.contains(RELEASES_MARKER) {
        bail!("Page shell does not contain the {:?} marker", RELEASES_MARKER);
    }
    Ok(shell.replacen(RELEASES_MARKER, fragment, 1))
}

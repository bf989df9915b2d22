//! The download-page fragment renderer.
//!
//! `render` is a pure function of the catalog and options: same input, same
//! bytes out. Releases and files appear in catalog order.

use log::debug;

use crate::catalog::{Catalog, LinkTarget, Release};
use crate::render::html::escape;

/// Display settings the fragment is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Product display name used in release headers (e.g., "ElectrumSV").
    pub product: String,
    /// Download-link prefix, without a trailing slash.
    pub base_url: String,
}

/// Render the catalog into an HTML fragment for the page's content region.
#[tracing::instrument(skip(catalog, options))]
pub fn render(catalog: &Catalog, options: &RenderOptions) -> String {
    let mut out = String::new();

    render_section(
        &mut out,
        "latest-release",
        "Latest Version",
        std::slice::from_ref(&catalog.latest),
        options,
    );
    if !catalog.older.is_empty() {
        render_section(
            &mut out,
            "older-releases",
            "Older releases",
            &catalog.older,
            options,
        );
    }
    if !catalog.experimental.is_empty() {
        render_section(
            &mut out,
            "experimental-releases",
            "Experimental releases",
            &catalog.experimental,
            options,
        );
    }

    debug!("Rendered download fragment: {} bytes", out.len());
    out
}

fn render_section(
    out: &mut String,
    id: &str,
    heading: &str,
    releases: &[Release],
    options: &RenderOptions,
) {
    out.push_str(&format!(
        "<section class=\"releases-section\" id=\"{}\">\n<h2>{}</h2>\n",
        id,
        escape(heading)
    ));
    for release in releases {
        render_release(out, release, options);
    }
    out.push_str("</section>\n");
}

fn render_release(out: &mut String, release: &Release, options: &RenderOptions) {
    out.push_str("<div class=\"release\">\n");
    out.push_str(&format!(
        "<h3 class=\"release-title\">{} {} ({})</h3>\n",
        escape(&options.product),
        escape(&release.version),
        escape(&release.release_date)
    ));
    out.push_str(&format!(
        "<p class=\"release-article\">{}</p>\n",
        article_anchor(&release.article_link)
    ));
    if let Some(note) = &release.extra_text {
        out.push_str(&format!(
            "<p class=\"release-note\"><em>{}</em></p>\n",
            escape(note)
        ));
    }
    render_files(out, release, options);
    out.push_str("</div>\n");
}

fn article_anchor(link: &LinkTarget) -> String {
    match link {
        LinkTarget::Internal(path) => {
            format!("<a href=\"{}\">Release notes</a>", escape(path))
        }
        // New browsing context without an opener back-reference.
        LinkTarget::External(url) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">Release notes\
             <span class=\"icon-external\" aria-hidden=\"true\"></span></a>",
            escape(url)
        ),
    }
}

fn render_files(out: &mut String, release: &Release, options: &RenderOptions) {
    if release.files.is_empty() {
        out.push_str("<p class=\"release-files-empty\"><em>None at this time</em></p>\n");
        return;
    }

    out.push_str("<table class=\"release-files\">\n");
    for file in &release.files {
        let href = file.download_url(&options.base_url, &release.version);
        out.push_str(&format!(
            "<tr>\
             <td class=\"file-type\"><span class=\"{}\" title=\"{}\"></span> {}</td>\
             <td class=\"file-download\"><a href=\"{}\">{}</a></td>\
             <td class=\"file-size\">{}</td>\
             </tr>\n",
            escape(&file.class_name),
            escape(&file.title),
            escape(&file.text),
            escape(&href),
            escape(&file.file_name),
            escape(&file.size_text)
        ));
    }
    out.push_str("</table>\n");
}

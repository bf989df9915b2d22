/// A single downloadable artifact belonging to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFile {
    /// CSS/icon class identifying the file type (installer, archive, ...).
    pub class_name: String,
    /// Tooltip text for the file-type icon.
    pub title: String,
    /// Short human label (e.g., "Windows installer").
    pub text: String,
    /// The published artifact's file name.
    pub file_name: String,
    /// Pre-formatted human-readable size (e.g., "42.3 MB").
    pub size_text: String,
}

impl ReleaseFile {
    /// The download URL for this file under the given base URL and release version.
    ///
    /// The shape is exactly `{base_url}/{version}/{file_name}`, byte for byte.
    pub fn download_url(&self, base_url: &str, version: &str) -> String {
        format!("{}/{}/{}", base_url, version, self.file_name)
    }
}

/// Where a release's changelog article lives.
///
/// Decided once at catalog assembly; rendering never re-inspects the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Same-origin path, starts with `/`.
    Internal(String),
    /// Absolute `http://` or `https://` URL, rendered with new-tab and
    /// `noopener` isolation.
    External(String),
}

impl LinkTarget {
    /// Classify a raw link string, or `None` if its shape is unrecognized.
    ///
    /// A protocol-relative `//host/path` is deliberately not accepted: it is
    /// neither clearly same-origin nor carries a scheme we can verify.
    pub fn classify(link: &str) -> Option<LinkTarget> {
        if link.starts_with("//") {
            None
        } else if link.starts_with('/') {
            Some(LinkTarget::Internal(link.to_string()))
        } else if link.starts_with("http://") || link.starts_with("https://") {
            Some(LinkTarget::External(link.to_string()))
        } else {
            None
        }
    }

    /// The raw link string.
    pub fn as_str(&self) -> &str {
        match self {
            LinkTarget::Internal(path) => path,
            LinkTarget::External(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, LinkTarget::External(_))
    }
}

/// One published version's metadata and its downloadable files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    /// Pre-formatted display date.
    pub release_date: String,
    /// Changelog link, classified at assembly.
    pub article_link: LinkTarget,
    /// Supplementary note under the release header. `None` means no note.
    pub extra_text: Option<String>,
    /// Ordered file list; empty means "None at this time" is rendered.
    pub files: Vec<ReleaseFile>,
}

/// The full set of releases to display, partitioned into the three
/// sections of the download page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub latest: Release,
    /// Rendered in given order; no re-sorting.
    pub older: Vec<Release>,
    pub experimental: Vec<Release>,
}

impl Catalog {
    /// Iterate over every release, latest first, then older, then experimental.
    pub fn all_releases(&self) -> impl Iterator<Item = &Release> {
        std::iter::once(&self.latest)
            .chain(self.older.iter())
            .chain(self.experimental.iter())
    }
}

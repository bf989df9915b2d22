//! Validation of a raw manifest into a [`Catalog`].
//!
//! Every error here is fatal for the build: a release either validates
//! completely or the whole manifest is rejected before rendering. Assembly is
//! deterministic, so re-running on the same input yields the same error.

use std::collections::HashSet;

use log::debug;

use crate::catalog::{Catalog, LinkTarget, Release, ReleaseFile};
use crate::manifest::{Manifest, ManifestFile, ManifestRelease};

/// Reasons a manifest cannot be turned into a renderable catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No designated latest release.
    #[error("Manifest has no latest release")]
    MissingLatestRelease,

    /// A release or file entry has an empty required field.
    #[error("Release \"{version}\" has an empty required field: {field}")]
    MalformedRelease { version: String, field: &'static str },

    /// The changelog link is neither a same-origin path nor an http(s) URL.
    /// Guessing would pick the wrong new-tab/noopener treatment, so reject.
    #[error("Release \"{version}\" has an unrecognized article link: {link:?}")]
    AmbiguousLinkTarget { version: String, link: String },

    /// Two files of one release share a name.
    #[error("Release \"{version}\" lists file {file_name:?} more than once")]
    DuplicateFileName { version: String, file_name: String },

    /// The latest release also appears in the older or experimental list.
    #[error("Latest release \"{version}\" is duplicated in another section")]
    DuplicateLatest { version: String },
}

impl Catalog {
    /// Validate a parsed manifest and assemble the immutable catalog.
    #[tracing::instrument(skip(manifest))]
    pub fn assemble(manifest: Manifest) -> Result<Catalog, CatalogError> {
        let latest = manifest.latest.ok_or(CatalogError::MissingLatestRelease)?;
        let latest = convert_release(latest)?;

        let older = manifest
            .older
            .into_iter()
            .map(convert_release)
            .collect::<Result<Vec<_>, _>>()?;
        let experimental = manifest
            .experimental
            .into_iter()
            .map(convert_release)
            .collect::<Result<Vec<_>, _>>()?;

        if older
            .iter()
            .chain(experimental.iter())
            .any(|release| release.version == latest.version)
        {
            return Err(CatalogError::DuplicateLatest {
                version: latest.version,
            });
        }

        debug!(
            "Assembled catalog: latest {}, {} older, {} experimental",
            latest.version,
            older.len(),
            experimental.len()
        );

        Ok(Catalog {
            latest,
            older,
            experimental,
        })
    }
}

fn convert_release(release: ManifestRelease) -> Result<Release, CatalogError> {
    let require = |value: &str, field: &'static str| {
        if value.is_empty() {
            Err(CatalogError::MalformedRelease {
                version: release.version.clone(),
                field,
            })
        } else {
            Ok(())
        }
    };

    require(&release.version, "version")?;
    require(&release.release_date, "release_date")?;

    let article_link = LinkTarget::classify(&release.article_link).ok_or_else(|| {
        CatalogError::AmbiguousLinkTarget {
            version: release.version.clone(),
            link: release.article_link.clone(),
        }
    })?;

    let mut seen = HashSet::new();
    for file in &release.files {
        if !seen.insert(file.file_name.as_str()) {
            return Err(CatalogError::DuplicateFileName {
                version: release.version.clone(),
                file_name: file.file_name.clone(),
            });
        }
    }

    let files = release
        .files
        .iter()
        .map(|file| convert_file(file, &release.version))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Release {
        // Empty and absent notes both mean "no note".
        extra_text: release.extra_text.filter(|text| !text.is_empty()),
        version: release.version,
        release_date: release.release_date,
        article_link,
        files,
    })
}

fn convert_file(file: &ManifestFile, version: &str) -> Result<ReleaseFile, CatalogError> {
    let require = |value: &str, field: &'static str| {
        if value.is_empty() {
            Err(CatalogError::MalformedRelease {
                version: version.to_string(),
                field,
            })
        } else {
            Ok(())
        }
    };

    require(&file.class_name, "class_name")?;
    require(&file.title, "title")?;
    require(&file.text, "text")?;
    require(&file.file_name, "file_name")?;
    require(&file.size_text, "size_text")?;

    Ok(ReleaseFile {
        class_name: file.class_name.clone(),
        title: file.title.clone(),
        text: file.text.clone(),
        file_name: file.file_name.clone(),
        size_text: file.size_text.clone(),
    })
}

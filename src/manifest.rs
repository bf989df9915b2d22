//! Raw release-metadata manifest as authored, before validation.
//!
//! This is the wire schema only. Field presence is enforced here by serde;
//! everything semantic (link shapes, duplicate file names, the latest-release
//! invariant) is checked during catalog assembly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One file entry as authored in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ManifestFile {
    pub class_name: String,
    pub title: String,
    pub text: String,
    pub file_name: String,
    pub size_text: String,
}

/// One release entry as authored in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ManifestRelease {
    pub version: String,
    pub release_date: String,
    pub article_link: String,
    /// Absent and empty are both treated as "no note".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_text: Option<String>,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

/// The release-metadata document for one download page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The designated latest release. Required; its absence is reported as
    /// a catalog assembly error rather than a parse error.
    #[serde(default)]
    pub latest: Option<ManifestRelease>,
    #[serde(default)]
    pub older: Vec<ManifestRelease>,
    #[serde(default)]
    pub experimental: Vec<ManifestRelease>,
}

impl Manifest {
    /// Parse a manifest from its JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse release manifest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "latest": {
            "version": "1.4.0",
            "release_date": "2021-05-01",
            "article_link": "/blog/1.4.0"
        }
    }"#;

    #[test]
    fn test_parse_minimal() {
        let manifest = Manifest::parse(MINIMAL).unwrap();
        let latest = manifest.latest.unwrap();
        assert_eq!(latest.version, "1.4.0");
        assert_eq!(latest.extra_text, None);
        assert!(latest.files.is_empty());
        assert!(manifest.older.is_empty());
        assert!(manifest.experimental.is_empty());
    }

    #[test]
    fn test_parse_full_release() {
        let manifest = Manifest::parse(
            r#"{
                "latest": {
                    "version": "1.4.0",
                    "release_date": "2021-05-01",
                    "article_link": "https://medium.com/@example/140",
                    "extra_text": "Requires macOS 10.13 or later.",
                    "files": [{
                        "class_name": "icon-dmg",
                        "title": "macOS disk image",
                        "text": "macOS",
                        "file_name": "ElectrumSV-1.4.0.dmg",
                        "size_text": "58.1 MB"
                    }]
                },
                "older": [],
                "experimental": []
            }"#,
        )
        .unwrap();
        let latest = manifest.latest.unwrap();
        assert_eq!(
            latest.extra_text.as_deref(),
            Some("Requires macOS 10.13 or later.")
        );
        assert_eq!(latest.files.len(), 1);
        assert_eq!(latest.files[0].file_name, "ElectrumSV-1.4.0.dmg");
    }

    #[test]
    fn test_parse_missing_latest_is_none() {
        let manifest = Manifest::parse(r#"{"older": [], "experimental": []}"#).unwrap();
        assert!(manifest.latest.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = Manifest::parse(r#"{"newest": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_missing_file_field() {
        // size_text left out of the file entry
        let result = Manifest::parse(
            r#"{
                "latest": {
                    "version": "1.4.0",
                    "release_date": "2021-05-01",
                    "article_link": "/blog/1.4.0",
                    "files": [{
                        "class_name": "icon-dmg",
                        "title": "macOS disk image",
                        "text": "macOS",
                        "file_name": "ElectrumSV-1.4.0.dmg"
                    }]
                }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(Manifest::parse("not json").is_err());
    }
}

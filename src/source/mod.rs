//! Source abstraction for release manifests.
//!
//! The manifest provider is opaque to the rest of the build: a manifest can
//! sit next to the site sources on disk or be published at a URL (an object
//! storage bucket, a CI artifact endpoint). Both arrive through one seam.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;
use crate::runtime::Runtime;

/// Where a manifest argument points, decided from its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSpec {
    /// Fetch over HTTP(S).
    Url(String),
    /// Read from the local filesystem.
    Path(PathBuf),
}

impl fmt::Display for ManifestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSpec::Url(url) => write!(f, "{}", url),
            ManifestSpec::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for ManifestSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            anyhow::bail!("Manifest location must not be empty.")
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(ManifestSpec::Url(s.to_string()))
        } else {
            Ok(ManifestSpec::Path(PathBuf::from(s)))
        }
    }
}

/// Trait for manifest providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetch the manifest document as JSON text.
    async fn fetch(&self) -> Result<String>;
}

/// Manifest provider reading a local file through the runtime.
pub struct FileSource<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> FileSource<'a, R> {
    pub fn new(runtime: &'a R, path: &Path) -> Self {
        Self {
            runtime,
            path: path.to_path_buf(),
        }
    }
}

#[async_trait]
impl<R: Runtime> ManifestSource for FileSource<'_, R> {
    async fn fetch(&self) -> Result<String> {
        debug!("Reading manifest from {:?}", self.path);
        self.runtime
            .read_to_string(&self.path)
            .with_context(|| format!("Failed to read manifest at {:?}", self.path))
    }
}

/// Manifest provider fetching from a URL.
pub struct HttpSource {
    client: HttpClient,
    url: String,
}

impl HttpSource {
    pub fn new(client: HttpClient, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl ManifestSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        debug!("Fetching manifest from {}", self.url);
        self.client
            .get_text(&self.url)
            .await
            .with_context(|| format!("Failed to fetch manifest from {}", self.url))
    }
}

/// Fetch the manifest text for a spec, picking the matching provider.
pub async fn fetch_manifest<R: Runtime>(
    runtime: &R,
    client: &HttpClient,
    spec: &ManifestSpec,
) -> Result<String> {
    match spec {
        ManifestSpec::Path(path) => FileSource::new(runtime, path).fetch().await,
        ManifestSpec::Url(url) => HttpSource::new(client.clone(), url).fetch().await,
    }
}

//! Asset provisioning
//!
//! Places library assets under their canonical names in `<target>/libs/`.
//! Two interchangeable strategies share one contract:
//!
//! - **remote**: HTTP GET streamed into the destination file
//! - **local**: byte copy from a directory of pre-fetched assets
//!
//! Each call blocks until the destination is flushed and closed, so the
//! return value is the completion signal. Any failure is a
//! [`ScaffoldError::Provisioning`] and is fatal to the run in both modes.

mod copy;
mod download;

pub use copy::copy_file;
pub use download::{build_client, download_file};

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::error::{Result, ScaffoldError};
use crate::profile::AssetLocation;

/// One asset to place in `libs/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Human-readable name for logs and errors (e.g. "ol3 script")
    pub name: &'static str,
    pub location: AssetLocation,
    /// Canonical file name inside `libs/`
    pub file_name: &'static str,
}

/// Resolved origin of an asset for the active mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

enum Strategy {
    Remote(reqwest::blocking::Client),
    Local(PathBuf),
}

/// Provisions assets using one strategy for the whole run
pub struct Provisioner {
    strategy: Strategy,
}

impl Provisioner {
    /// Remote-fetch provisioner. `timeout` of `None` waits indefinitely.
    pub fn remote(timeout: Option<Duration>) -> Result<Self> {
        let client = build_client(timeout).map_err(|e| ScaffoldError::HttpClient {
            reason: format!("{:#}", e),
        })?;
        Ok(Self::with_client(client))
    }

    /// Remote-fetch provisioner using a caller-built client
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self {
            strategy: Strategy::Remote(client),
        }
    }

    /// Local-copy provisioner reading from `assets_dir`.
    pub fn local(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            strategy: Strategy::Local(assets_dir.into()),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.strategy, Strategy::Local(_))
    }

    /// Where `location` is read from under the active strategy
    pub fn source_for(&self, location: &AssetLocation) -> Source {
        match &self.strategy {
            Strategy::Remote(_) => Source::Remote(location.url.to_string()),
            Strategy::Local(dir) => Source::Local(dir.join(location.local)),
        }
    }

    /// Provision `asset` into `libs_dir`, returning bytes written.
    pub fn provision(&self, asset: &Asset, libs_dir: &Path) -> Result<u64> {
        let dest = libs_dir.join(asset.file_name);
        let source = self.source_for(&asset.location);

        tracing::debug!(asset = asset.name, source = %source, dest = %dest.display(), "provisioning");

        let outcome = match &self.strategy {
            Strategy::Remote(client) => download_file(client, asset.location.url, &dest),
            Strategy::Local(dir) => copy_file(&dir.join(asset.location.local), &dest),
        };

        match outcome {
            Ok(bytes) => {
                tracing::info!(asset = asset.name, source = %source, dest = %dest.display(), bytes, "provisioned");
                Ok(bytes)
            }
            Err(e) => {
                tracing::error!(asset = asset.name, source = %source, dest = %dest.display(), error = %format!("{:#}", e), "provisioning failed");
                Err(ScaffoldError::Provisioning {
                    asset: asset.name.to_string(),
                    source_location: source.to_string(),
                    dest,
                    reason: format!("{:#}", e),
                })
            }
        }
    }
}

/// `<dest>.part`, the staging file a write goes through
fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("asset"));
    name.push(".part");
    dest.with_file_name(name)
}

/// Fill a staging file via `fill`, then rename it over `dest`.
///
/// Returns once the data is flushed and synced. On failure the staging file
/// is removed and `dest` keeps whatever it held before.
fn write_replacing<F>(dest: &Path, fill: F) -> anyhow::Result<u64>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<u64>,
{
    let staging = staging_path(dest);
    let result = (|| -> anyhow::Result<u64> {
        let file = File::create(&staging)
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        let mut writer = BufWriter::new(file);
        let bytes = fill(&mut writer)?;
        writer.flush()?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        fs::rename(&staging, dest)
            .with_context(|| format!("Failed to move into place {}", dest.display()))?;
        Ok(bytes)
    })();

    if result.is_err() {
        fs::remove_file(&staging).ok();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{JQUERY, OL3};
    use std::fs;
    use tempfile::TempDir;

    fn ol_script() -> Asset {
        Asset {
            name: "ol3 script",
            location: OL3.script,
            file_name: "ol.js",
        }
    }

    #[test]
    fn test_source_for_each_mode() {
        let local = Provisioner::local("/srv/assets");
        assert_eq!(
            local.source_for(&JQUERY.script),
            Source::Local(PathBuf::from("/srv/assets/jquery/jquery.js"))
        );
        assert!(local.is_local());

        let remote = Provisioner::remote(None).unwrap();
        assert_eq!(
            remote.source_for(&JQUERY.script),
            Source::Remote("http://code.jquery.com/jquery-1.11.1.min.js".to_string())
        );
        assert!(!remote.is_local());
    }

    #[test]
    fn test_local_provision_copies_to_canonical_name() {
        let assets = TempDir::new().unwrap();
        fs::create_dir_all(assets.path().join("ol3")).unwrap();
        fs::write(assets.path().join("ol3/ol.js"), "// ol").unwrap();

        let libs = TempDir::new().unwrap();
        let provisioner = Provisioner::local(assets.path());
        let bytes = provisioner.provision(&ol_script(), libs.path()).unwrap();

        assert_eq!(bytes, 5);
        assert_eq!(fs::read_to_string(libs.path().join("ol.js")).unwrap(), "// ol");
    }

    #[test]
    fn test_local_failure_is_provisioning_error() {
        let assets = TempDir::new().unwrap();
        let libs = TempDir::new().unwrap();

        let err = Provisioner::local(assets.path())
            .provision(&ol_script(), libs.path())
            .unwrap_err();

        match err {
            ScaffoldError::Provisioning { asset, dest, .. } => {
                assert_eq!(asset, "ol3 script");
                assert_eq!(dest, libs.path().join("ol.js"));
            }
            other => panic!("expected provisioning error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_local_asset_keeps_previous_copy() {
        let assets = TempDir::new().unwrap();
        // Opens fine, fails on read
        fs::create_dir_all(assets.path().join("ol3/ol.js")).unwrap();

        let libs = TempDir::new().unwrap();
        let dest = libs.path().join("ol.js");
        fs::write(&dest, "// ol from an earlier run").unwrap();

        let err = Provisioner::local(assets.path())
            .provision(&ol_script(), libs.path())
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Provisioning { .. }));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "// ol from an earlier run");
        assert!(!libs.path().join("ol.js.part").exists());
    }

    #[test]
    fn test_staging_path_is_sibling() {
        assert_eq!(
            staging_path(Path::new("app/libs/ol.js")),
            PathBuf::from("app/libs/ol.js.part")
        );
    }
}

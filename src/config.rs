//! User configuration stored in `~/.ol-app-setup/config.toml`
//!
//! Every key is optional. Layering is: built-in defaults, then this file,
//! then command-line flags (applied by the binary).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::paths;
use crate::profile::DEFAULT_VERSION;

/// Port the static server binds when nothing else is configured
pub const DEFAULT_PORT: u16 = 8000;

/// Per-request fetch timeout in seconds (0 disables the timeout)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Library version used when `--olversion` is absent
    #[serde(default = "default_version")]
    pub default_version: String,
    /// Static server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Template directory (tilde-expanded)
    #[serde(default)]
    pub templates_dir: Option<String>,
    /// Local asset directory; when set, assets are copied instead of downloaded
    #[serde(default)]
    pub assets_dir: Option<String>,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_version: default_version(),
            port: default_port(),
            templates_dir: None,
            assets_dir: None,
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Config {
    /// Load config from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is a
    /// configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ScaffoldError::Configuration(format!("invalid {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `~/.ol-app-setup/config.toml`
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::config_path())
    }

    /// Resolved template directory
    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .as_deref()
            .map(expand)
            .unwrap_or_else(paths::templates_dir)
    }

    /// Resolved local asset directory, if local-copy mode is configured
    pub fn assets_dir(&self) -> Option<PathBuf> {
        self.assets_dir.as_deref().map(expand)
    }

    /// Fetch timeout, `None` when disabled
    pub fn fetch_timeout(&self) -> Option<std::time::Duration> {
        match self.fetch_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_version, "ol3");
        assert_eq!(config.port, 8000);
        assert!(config.assets_dir().is_none());
        assert_eq!(config.templates_dir(), paths::templates_dir());
        assert_eq!(
            config.fetch_timeout(),
            Some(std::time::Duration::from_secs(300))
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "default_version = \"ol2\"\nport = 9090\nassets_dir = \"/srv/assets\"\nfetch_timeout_secs = 0\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_version, "ol2");
        assert_eq!(config.port, 9090);
        assert_eq!(config.assets_dir(), Some(PathBuf::from("/srv/assets")));
        assert_eq!(config.fetch_timeout(), None);
    }

    #[test]
    fn test_tilde_expansion() {
        let config = Config {
            templates_dir: Some("~/my-templates".to_string()),
            ..Default::default()
        };
        let dir = config.templates_dir();
        assert!(dir.ends_with("my-templates"));
        if let Some(home) = dirs::home_dir() {
            assert!(dir.starts_with(home));
        }
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "port = \"not a number\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.is_configuration());
    }
}

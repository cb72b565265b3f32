//! Single source of truth for ALL ol-app-setup filesystem layout.
//!
//! This module defines WHERE things live. It has no I/O, no validation,
//! no business logic. One file shows the entire layout.
//!
//! # User-Level Paths (~/.ol-app-setup/)
//!
//! ```text
//! ~/.ol-app-setup/
//! ├── config.toml              # Optional user config
//! └── templates/               # Installed (editable) app/index templates
//! ```
//!
//! # Generated App (<target>/)
//!
//! ```text
//! <target>/
//! ├── app.js                   # From the profile's app template
//! ├── index.html               # From the profile's index template
//! └── libs/
//!     ├── ol.js, ol.css        # Always
//!     ├── jquery.js            # --jquery
//!     └── bootstrap3.js, bootstrap3.css   # --bootstrap
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// User Level (~/.ol-app-setup/)
// =============================================================================

/// Tool home directory: `~/.ol-app-setup/`
pub fn home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ol-app-setup")
}

/// User config file: `~/.ol-app-setup/config.toml`
pub fn config_path() -> PathBuf {
    home().join("config.toml")
}

/// Installed templates: `~/.ol-app-setup/templates/`
pub fn templates_dir() -> PathBuf {
    home().join("templates")
}

// =============================================================================
// Generated App (<target>/)
// =============================================================================

/// Paths inside a generated app
pub mod app {
    use super::*;

    /// Name of the library assets subdirectory
    pub const LIBS_DIR: &str = "libs";

    /// `<target>/libs/`
    pub fn libs_dir(target: &Path) -> PathBuf {
        target.join(LIBS_DIR)
    }

    /// `<target>/app.js`
    pub fn app_js(target: &Path) -> PathBuf {
        target.join("app.js")
    }

    /// `<target>/index.html`
    pub fn index_html(target: &Path) -> PathBuf {
        target.join("index.html")
    }

    /// `<target>/libs/<file_name>`
    pub fn lib_file(target: &Path, file_name: &str) -> PathBuf {
        libs_dir(target).join(file_name)
    }
}

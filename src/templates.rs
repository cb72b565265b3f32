//! Template extraction
//!
//! The app and index templates for every profile are embedded at compile
//! time and extracted into the templates directory on first use. Files
//! already present are left alone, so user edits there win.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

// =============================================================================
// Embedded Templates
// =============================================================================

mod embedded {
    pub const INDEX_OL3: &str = include_str!("../resources/templates/index.ol3.template");
    pub const APP_OL3: &str = include_str!("../resources/templates/app.ol3.template");
    pub const INDEX_OL2: &str = include_str!("../resources/templates/index.ol2.template");
    pub const APP_OL2: &str = include_str!("../resources/templates/app.ol2.template");
}

/// (file name, content) of every embedded template
pub const EMBEDDED: &[(&str, &str)] = &[
    ("index.ol3.template", embedded::INDEX_OL3),
    ("app.ol3.template", embedded::APP_OL3),
    ("index.ol2.template", embedded::INDEX_OL2),
    ("app.ol2.template", embedded::APP_OL2),
];

// =============================================================================
// Public API
// =============================================================================

/// Write every embedded template missing from `templates_dir`.
///
/// Returns the paths that were written.
pub fn install_missing(templates_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(templates_dir).map_err(|e| ScaffoldError::Directory {
        path: templates_dir.to_path_buf(),
        source: e,
    })?;

    let mut installed = Vec::new();
    for (name, content) in EMBEDDED {
        let path = templates_dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, content).map_err(|e| ScaffoldError::Render {
            path: path.clone(),
            reason: format!("cannot install template: {}", e),
        })?;
        tracing::info!(template = %path.display(), "installed template");
        installed.push(path);
    }

    Ok(installed)
}

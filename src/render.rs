//! Placeholder substitution for `index.html`
//!
//! The index template carries three literal tokens. Each is replaced
//! globally with an inclusion snippet when its asset was requested, or with
//! the empty string otherwise. The file is read whole, rewritten whole.

use std::fs;
use std::path::Path;

use crate::error::{Result, ScaffoldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    JQuery,
    BootstrapCss,
    BootstrapJs,
}

impl Placeholder {
    pub const ALL: [Placeholder; 3] = [
        Placeholder::JQuery,
        Placeholder::BootstrapCss,
        Placeholder::BootstrapJs,
    ];

    /// Literal marker in the template
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::JQuery => "__JQUERY__",
            Placeholder::BootstrapCss => "__BOOTSTRAPCSS__",
            Placeholder::BootstrapJs => "__BOOTSTRAPJS__",
        }
    }

    /// Markup inserted when the asset is part of the app
    pub fn snippet(self) -> &'static str {
        match self {
            Placeholder::JQuery => r#"<script src="libs/jquery.js"></script>"#,
            Placeholder::BootstrapCss => {
                r#"<link rel="stylesheet" type="text/css" href="libs/bootstrap3.css">"#
            }
            Placeholder::BootstrapJs => r#"<script src="libs/bootstrap3.js"></script>"#,
        }
    }
}

/// Ordered (token, replacement) pairs for the requested assets
pub fn substitutions(jquery: bool, bootstrap: bool) -> Vec<(&'static str, &'static str)> {
    Placeholder::ALL
        .iter()
        .map(|&p| {
            let enabled = match p {
                Placeholder::JQuery => jquery,
                Placeholder::BootstrapCss | Placeholder::BootstrapJs => bootstrap,
            };
            (p.token(), if enabled { p.snippet() } else { "" })
        })
        .collect()
}

/// Apply every substitution to `text`, replacing all occurrences
pub fn render_str(text: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(text.to_string(), |acc, (token, replacement)| {
            acc.replace(token, replacement)
        })
}

/// Rewrite `path` in place with `substitutions` applied.
///
/// The caller must have finished writing `path` before calling this.
/// Returns the length of the rendered file.
pub fn render_file(path: &Path, substitutions: &[(&str, &str)]) -> Result<u64> {
    let text = fs::read_to_string(path).map_err(|e| ScaffoldError::Render {
        path: path.to_path_buf(),
        reason: format!("cannot read: {}", e),
    })?;

    let rendered = render_str(&text, substitutions);

    fs::write(path, &rendered).map_err(|e| ScaffoldError::Render {
        path: path.to_path_buf(),
        reason: format!("cannot write: {}", e),
    })?;

    tracing::info!(file = %path.display(), bytes = rendered.len(), "rendered placeholders");
    Ok(rendered.len() as u64)
}

//! Scaffolder - builds an app skeleton on disk
//!
//! Pipeline, strictly sequential:
//!
//! ```text
//! Options ──resolve──▶ Plan            (no filesystem access)
//!                       │
//!                       ├─ prepare <target>/ and <target>/libs/
//!                       ├─ provision assets into libs/
//!                       ├─ copy app template   → app.js
//!                       ├─ copy index template → index.html
//!                       └─ render placeholders in index.html
//! ```
//!
//! Every step blocks until its files are closed, so each step sees the
//! previous one fully on disk. The first error aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use ol_app_setup::provision::Provisioner;
//! use ol_app_setup::scaffold::{Options, Plan, Scaffolder};
//!
//! let options = Options {
//!     target: "/tmp/app1".into(),
//!     jquery: true,
//!     ..Default::default()
//! };
//! let plan = Plan::resolve(&options, "ol3")?;
//! let scaffolder = Scaffolder::new(Provisioner::remote(None)?, "templates");
//! let report = scaffolder.run(&plan)?;
//! println!("{} files written", report.files.len());
//! # Ok::<(), ol_app_setup::ScaffoldError>(())
//! ```

mod internal;

use std::path::PathBuf;

use crate::error::{Result, ScaffoldError};
use crate::profile::{Profile, BOOTSTRAP3, JQUERY};
use crate::provision::{Asset, Provisioner};

/// What the user asked for
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Directory to create the app in
    pub target: PathBuf,
    /// Library version key; `None` selects the configured default
    pub version: Option<String>,
    /// Include jQuery
    pub jquery: bool,
    /// Include Bootstrap 3
    pub bootstrap: bool,
    /// Serve the target directory after scaffolding
    pub serve: bool,
}

/// Fully resolved run: profile chosen, asset list fixed
#[derive(Debug, Clone)]
pub struct Plan {
    pub target: PathBuf,
    pub profile: &'static Profile,
    pub assets: Vec<Asset>,
    pub jquery: bool,
    pub bootstrap: bool,
}

impl Plan {
    /// Validate options and select the profile.
    ///
    /// Touches nothing on disk, so a configuration error here leaves the
    /// filesystem exactly as it was.
    pub fn resolve(options: &Options, default_version: &str) -> Result<Self> {
        if options.target.as_os_str().is_empty() {
            return Err(ScaffoldError::Configuration(
                "target directory is required".to_string(),
            ));
        }

        let key = options.version.as_deref().unwrap_or(default_version);
        let profile = Profile::resolve(key)?;

        let mut assets = vec![
            Asset {
                name: "library script",
                location: profile.script,
                file_name: "ol.js",
            },
            Asset {
                name: "library stylesheet",
                location: profile.style,
                file_name: "ol.css",
            },
        ];

        if options.jquery {
            assets.push(Asset {
                name: "jquery script",
                location: JQUERY.script,
                file_name: "jquery.js",
            });
        }

        if options.bootstrap {
            assets.push(Asset {
                name: "bootstrap3 script",
                location: BOOTSTRAP3.script,
                file_name: "bootstrap3.js",
            });
            if let Some(style) = BOOTSTRAP3.style {
                assets.push(Asset {
                    name: "bootstrap3 stylesheet",
                    location: style,
                    file_name: "bootstrap3.css",
                });
            }
        }

        Ok(Self {
            target: options.target.clone(),
            profile,
            assets,
            jquery: options.jquery,
            bootstrap: options.bootstrap,
        })
    }
}

/// One file produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    pub files: Vec<WrittenFile>,
}

impl ScaffoldReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// Runs plans with one provisioning strategy and template directory
pub struct Scaffolder {
    provisioner: Provisioner,
    templates_dir: PathBuf,
    quiet: bool,
}

impl Scaffolder {
    pub fn new(provisioner: Provisioner, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            provisioner,
            templates_dir: templates_dir.into(),
            quiet: false,
        }
    }

    /// Suppress progress lines on stdout (tracing output is unaffected)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Execute `plan`, stopping at the first failure
    pub fn run(&self, plan: &Plan) -> Result<ScaffoldReport> {
        internal::run(self, plan)
    }
}

//! Internal implementation of the scaffolding pipeline

use std::fs;
use std::path::Path;

use super::{Plan, ScaffoldReport, Scaffolder, WrittenFile};
use crate::error::{Result, ScaffoldError};
use crate::paths;
use crate::provision::copy_file;
use crate::render;
use crate::templates;

pub(super) fn run(scaffolder: &Scaffolder, plan: &Plan) -> Result<ScaffoldReport> {
    let say = |line: String| {
        if !scaffolder.quiet {
            println!("{}", line);
        }
    };

    tracing::info!(
        target_dir = %plan.target.display(),
        profile = plan.profile.key,
        jquery = plan.jquery,
        bootstrap = plan.bootstrap,
        local = scaffolder.provisioner.is_local(),
        "scaffolding app"
    );
    say(format!(
        "🗺️  Setting up {} app in {}",
        plan.profile,
        plan.target.display()
    ));

    // Step 1: Directories
    prepare_dirs(&plan.target)?;
    let libs_dir = paths::app::libs_dir(&plan.target);

    let mut report = ScaffoldReport::default();

    // Step 2: Library assets
    for asset in &plan.assets {
        say(format!(
            "  ⬇ {}",
            scaffolder.provisioner.source_for(&asset.location)
        ));
        let bytes = scaffolder.provisioner.provision(asset, &libs_dir)?;
        let path = libs_dir.join(asset.file_name);
        say(format!("  ✓ {} ({} bytes)", relative(&plan.target, &path), bytes));
        report.files.push(WrittenFile { path, bytes });
    }

    // Step 3: Templates
    templates::install_missing(&scaffolder.templates_dir)?;

    let app_js = paths::app::app_js(&plan.target);
    let bytes = copy_template(
        &scaffolder.templates_dir.join(plan.profile.app_template),
        &app_js,
    )?;
    say(format!("  ✓ {}", relative(&plan.target, &app_js)));
    report.files.push(WrittenFile {
        path: app_js,
        bytes,
    });

    // Index must be fully copied before it is rewritten in place
    let index_html = paths::app::index_html(&plan.target);
    copy_template(
        &scaffolder.templates_dir.join(plan.profile.index_template),
        &index_html,
    )?;
    let bytes = render::render_file(
        &index_html,
        &render::substitutions(plan.jquery, plan.bootstrap),
    )?;
    say(format!("  ✓ {}", relative(&plan.target, &index_html)));
    report.files.push(WrittenFile {
        path: index_html,
        bytes,
    });

    tracing::info!(
        files = report.files.len(),
        bytes = report.total_bytes(),
        "scaffolding complete"
    );
    Ok(report)
}

/// Ensure `<target>/` and `<target>/libs/` exist.
///
/// Both creations are attempted even if the first fails; the first error
/// is returned.
fn prepare_dirs(target: &Path) -> Result<()> {
    let libs_dir = paths::app::libs_dir(target);

    let results = [target, libs_dir.as_path()].map(|dir| {
        fs::create_dir_all(dir).map_err(|e| {
            tracing::error!(dir = %dir.display(), error = %e, "cannot create directory");
            ScaffoldError::Directory {
                path: dir.to_path_buf(),
                source: e,
            }
        })
    });

    for result in results {
        result?;
    }

    tracing::debug!(libs = %libs_dir.display(), "directories ready");
    Ok(())
}

fn copy_template(template: &Path, dest: &Path) -> Result<u64> {
    copy_file(template, dest).map_err(|e| {
        tracing::error!(template = %template.display(), dest = %dest.display(), error = %format!("{:#}", e), "template copy failed");
        ScaffoldError::Render {
            path: dest.to_path_buf(),
            reason: format!("{:#}", e),
        }
    })
}

fn relative(target: &Path, path: &Path) -> String {
    path.strip_prefix(target)
        .unwrap_or(path)
        .display()
        .to_string()
}

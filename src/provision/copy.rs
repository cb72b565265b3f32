//! Local copy strategy, also used for template files.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::write_replacing;

/// Stream `source` into `dest`, replacing `dest` only on success.
///
/// Returns the number of bytes written once `dest` is flushed and closed.
/// A source that is missing or fails mid-read leaves `dest` untouched.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    let input =
        File::open(source).with_context(|| format!("Failed to open {}", source.display()))?;
    let mut reader = BufReader::new(input);

    write_replacing(dest, |writer| {
        std::io::copy(&mut reader, writer)
            .with_context(|| format!("Failed to copy {}", source.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copy_overwrites_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("ol.js");
        let dest = temp.path().join("copy.js");
        fs::write(&src, "var ol = {};").unwrap();
        fs::write(&dest, "old content that is longer than the new one").unwrap();

        let bytes = copy_file(&src, &dest).unwrap();
        assert_eq!(bytes, 12);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "var ol = {};");
    }

    #[test]
    fn test_missing_source_leaves_destination_untouched() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("copy.js");
        fs::write(&dest, "keep").unwrap();

        let err = copy_file(&temp.path().join("missing.js"), &dest).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "keep");
    }

    #[test]
    fn test_failed_read_leaves_destination_untouched() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("ol.js");
        fs::create_dir(&src).unwrap();
        let dest = temp.path().join("copy.js");
        fs::write(&dest, "keep").unwrap();

        let err = copy_file(&src, &dest).unwrap_err();
        assert!(err.to_string().contains("Failed to copy"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "keep");
        assert!(!temp.path().join("copy.js.part").exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("ol.js");
        fs::write(&src, "x").unwrap();

        let err = copy_file(&src, &temp.path().join("no-such-dir/ol.js")).unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
    }
}

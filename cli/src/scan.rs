//! Directory walker

use crate::config::GeneratorConfig;
use anyhow::{Context, Result};
use registrygen_core::FileRecord;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Every regular file below `directory`, skipping configured directory names
///
/// Entries within a directory are visited in file-name order so the result
/// is stable across runs.
pub fn scan_directory(directory: &Path, config: &GeneratorConfig) -> Result<Vec<FileRecord>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, config));

    for entry in walker {
        let entry = entry.context(format!("Failed to scan {}", directory.display()))?;
        if entry.file_type().is_file() {
            files.push(FileRecord::new(entry.path()));
        }
    }

    debug!("Found {} files under {}", files.len(), directory.display());
    Ok(files)
}

fn is_skipped(entry: &DirEntry, config: &GeneratorConfig) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.skip_directories.iter().any(|skip| skip == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_skips_configured_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("src");
        touch(&root, "ui/button.tsx");
        touch(&root, "node_modules/react/index.js");
        touch(&root, "dist/bundle.js");
        touch(&root, "lib/utils.ts");

        let files = scan_directory(&root, &GeneratorConfig::default()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.root_relative_path.as_str()).collect();
        assert_eq!(paths, vec!["./src/lib/utils.ts", "./src/ui/button.tsx"]);
    }

    #[test]
    fn test_skip_only_applies_to_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("src");
        touch(&root, "dist");

        let files = scan_directory(&root, &GeneratorConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = scan_directory(&temp.path().join("nope"), &GeneratorConfig::default());
        assert!(result.is_err());
    }
}

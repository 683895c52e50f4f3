//! Configuration file discovery and loading
//!
//! Every file is looked up by walking from the scan directory towards the
//! filesystem root; the nearest one wins. Missing files are skipped, broken
//! ones are hard errors.

use super::schema::{GeneratorConfig, PackageManifest, TsConfig};
use anyhow::{Context, Result};
use registrygen_core::PathMappings;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the generator config file
pub const GENERATOR_CONFIG_FILE: &str = "registrygen-config.json";

/// Name of the package manifest
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

/// Project configs consulted for path aliases, in order
pub const TSCONFIG_CANDIDATES: &[&str] = &["tsconfig.json", "tsconfig.node.json", "tsconfig.app.json"];

/// Find and parse the nearest `file_name` at or above `start_dir`
///
/// Returns the parsed value together with the path it was read from, or
/// `None` when no ancestor has the file.
pub fn read_nearest_json<T: DeserializeOwned>(
    start_dir: &Path,
    file_name: &str,
) -> Result<Option<(T, PathBuf)>> {
    for dir in start_dir.ancestors() {
        let path = dir.join(file_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if is_missing(e.kind()) => continue,
            Err(e) => {
                return Err(e).context(format!("Failed to read {}", path.display()));
            }
        };

        let value = serde_json::from_str(&content)
            .context(format!("Failed to parse {}", path.display()))?;
        debug!("Using {}", path.display());
        return Ok(Some((value, path)));
    }

    Ok(None)
}

fn is_missing(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::IsADirectory
    )
}

/// Load the generator config, falling back to defaults when absent
///
/// Validates the config after loading.
pub fn load_generator_config(start_dir: &Path) -> Result<GeneratorConfig> {
    let Some((config, path)) = read_nearest_json::<GeneratorConfig>(start_dir, GENERATOR_CONFIG_FILE)?
    else {
        debug!("No {} found, using defaults", GENERATOR_CONFIG_FILE);
        return Ok(GeneratorConfig::default());
    };

    if let Err(errors) = config.validate() {
        anyhow::bail!(
            "Config validation failed in {}:\n  {}",
            path.display(),
            errors.join("\n  ")
        );
    }

    Ok(config)
}

/// Load the nearest package manifest; a missing manifest is an error
pub fn load_package_manifest(start_dir: &Path) -> Result<PackageManifest> {
    match read_nearest_json::<PackageManifest>(start_dir, PACKAGE_MANIFEST_FILE)? {
        Some((manifest, _)) => Ok(manifest),
        None => anyhow::bail!(
            "No {} found in {} or any parent directory",
            PACKAGE_MANIFEST_FILE,
            start_dir.display()
        ),
    }
}

/// Build the alias table from every tsconfig candidate found
pub fn load_path_mappings(start_dir: &Path) -> Result<PathMappings> {
    let mut entries = Vec::new();
    for candidate in TSCONFIG_CANDIDATES {
        if let Some((tsconfig, _)) = read_nearest_json::<TsConfig>(start_dir, candidate)? {
            entries.extend(tsconfig.path_entries());
        }
    }
    Ok(PathMappings::from_entries(entries))
}

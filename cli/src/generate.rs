//! The three-pass generation pipeline
//!
//! 1. Scan the directory into file records.
//! 2. Enrich source files with annotations and classified imports.
//! 3. Assemble, validate and write the registry document.

use crate::config;
use crate::enrich::enrich_files;
use crate::scan::scan_directory;
use crate::validate::{validate_against_remote_schema, validate_document};
use anyhow::{Context, Result};
use registrygen_core::catalog::MANIFEST_FILE_NAME;
use registrygen_core::{
    LocalFileIndex, ModuleSpecifierClassifier, RegistryCatalogResolver, build_document, paths,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inputs of one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Directory to scan; the registry is named after it
    pub directory: PathBuf,

    /// Overrides the derived registry name
    pub name: Option<String>,

    /// Overrides the generator config's `homePage`
    pub homepage: Option<String>,

    /// Where to write the document; defaults to `<directory>/registry.json`
    pub output: Option<PathBuf>,
}

/// Run the pipeline with the HTTP catalog transport
pub async fn generate(options: &GenerateOptions) -> Result<PathBuf> {
    let catalog = RegistryCatalogResolver::http();
    generate_with(options, &catalog).await
}

/// Run the pipeline against a given catalog resolver
///
/// Returns the path the document was written to.
pub async fn generate_with(
    options: &GenerateOptions,
    catalog: &RegistryCatalogResolver,
) -> Result<PathBuf> {
    let directory = std::path::absolute(&options.directory).context(format!(
        "Failed to resolve directory: {}",
        options.directory.display()
    ))?;
    ensure_directory_exists(&directory)?;

    let root_directory = paths::to_root_relative(&directory.to_string_lossy().replace('\\', "/"));
    debug!("Root directory: {}", root_directory);

    let generator_config = config::load_generator_config(&directory)?;
    let registries = generator_config.registries(&root_directory);
    debug!("{} known registries", registries.len());

    let name = options
        .name
        .clone()
        .unwrap_or_else(|| {
            default_registry_name(
                &generator_config.registry_prefix,
                &root_directory,
                &directory,
            )
        });
    let homepage = options
        .homepage
        .clone()
        .or_else(|| generator_config.home_page.clone());
    debug!("Registry name: {}, homepage: {:?}", name, homepage);

    let packages = config::load_package_manifest(&directory)?.package_names();
    debug!("{} declared packages", packages.len());

    let mappings = config::load_path_mappings(&directory)?;
    for mapping in mappings.iter() {
        debug!("Path mapping {} → {}", mapping.alias, mapping.target);
    }

    info!("Pass 1: Scanning directory...");
    let files = scan_directory(&directory, &generator_config)?;

    info!("Pass 2: Enriching scanned files...");
    let file_index = LocalFileIndex::new(&files);
    let classifier = ModuleSpecifierClassifier {
        known_packages: &packages,
        registries: &registries,
        mappings: &mappings,
        file_index: &file_index,
        catalog,
    };
    let analyzed = enrich_files(&files, &generator_config, &classifier).await?;

    info!(
        "Pass 3: Building registry.json for {} on {}...",
        name,
        homepage.as_deref().unwrap_or("(no homepage)")
    );
    let document = build_document(&name, homepage.as_deref(), &analyzed);

    let validation = match validate_document(&document) {
        Ok(()) => validate_against_remote_schema(&document).await,
        Err(errors) => Err(errors),
    };
    if let Err(errors) = validation {
        eprintln!("Registry JSON failed schema validation. Errors:");
        for error in &errors {
            eprintln!("{}", error);
        }
        anyhow::bail!("Registry JSON validation failed; registry.json was not written.");
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| directory.join(MANIFEST_FILE_NAME));
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize registry")?;
    tokio::fs::write(&output, json)
        .await
        .context(format!("Failed to write {}", output.display()))?;

    info!("Wrote {} items to {}", document.items.len(), output.display());
    Ok(output)
}

fn ensure_directory_exists(directory: &Path) -> Result<()> {
    match std::fs::metadata(directory) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => anyhow::bail!("Provided path is not a directory: {}", directory.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!("Directory not found: {}", directory.display())
        }
        Err(e) => Err(e).context(format!("Failed to access {}", directory.display())),
    }
}

/// `prefix` + last segment of the root-relative directory, or its base name
fn default_registry_name(prefix: &str, root_directory: &str, directory: &Path) -> String {
    let tail = root_directory.rsplit('/').next().unwrap_or(root_directory);
    let tail = if tail.is_empty() {
        directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        tail.to_string()
    };
    format!("{}{}", prefix, tail)
}

//! Configuration schema for registrygen
//!
//! Data structures for the three JSON files a run reads: the generator
//! config, the package manifest and the TypeScript project config. Every
//! field defaults so partial files are accepted.

use indexmap::IndexMap;
use registrygen_core::{Registries, RegistryDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Contents of `registrygen-config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Extensions (with leading dot) parsed for annotations and imports
    pub allowed_extensions: Vec<String>,

    /// Directory names the walker never descends into
    pub skip_directories: Vec<String>,

    /// Foreign registries keyed by the local path prefix of their specifiers
    pub known_registries: BTreeMap<String, KnownRegistry>,

    /// Prepended to the default registry name
    pub registry_prefix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: [".js", ".jsx", ".ts", ".tsx"]
                .into_iter()
                .map(String::from)
                .collect(),
            skip_directories: ["node_modules", ".git", "dist", ".dist"]
                .into_iter()
                .map(String::from)
                .collect(),
            known_registries: BTreeMap::new(),
            registry_prefix: String::new(),
            home_page: None,
        }
    }
}

/// One `knownRegistries` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnownRegistry {
    pub prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl GeneratorConfig {
    /// Validate the configuration for common errors
    ///
    /// Returns Ok(()) if valid, or Err with a list of error messages
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for ext in &self.allowed_extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                errors.push(format!(
                    "allowedExtensions entry '{}' must look like '.ext'",
                    ext
                ));
            }
        }

        for dir in &self.skip_directories {
            if dir.is_empty() || dir.contains('/') {
                errors.push(format!(
                    "skipDirectories entry '{}' must be a single directory name",
                    dir
                ));
            }
        }

        for (key, registry) in &self.known_registries {
            if key.is_empty() {
                errors.push("knownRegistries key cannot be empty".to_string());
            }
            if registry.prefix.is_empty() {
                errors.push(format!("knownRegistries.{}.prefix cannot be empty", key));
            }
            if let Some(url) = &registry.url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    errors.push(format!(
                        "knownRegistries.{}.url '{}' must be an http(s) URL",
                        key, url
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whether `path` has one of the allowed extensions
    pub fn is_allowed(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.strip_prefix('.') == Some(ext)),
            None => false,
        }
    }

    /// Known registries as descriptors, minus the registry being generated
    pub fn registries(&self, root_directory: &str) -> Registries {
        let mut registries = Registries::new(self.known_registries.iter().map(|(key, registry)| {
            RegistryDescriptor {
                url_prefix_key: key.clone(),
                target_prefix: Some(registry.prefix.clone()),
                catalog_url: registry.url.clone(),
                auth_headers: registry.headers.clone(),
            }
        }));
        if registries.remove_key(root_directory).is_some() {
            tracing::debug!("Not treating {} as a foreign registry", root_directory);
        }
        registries
    }
}

/// The parts of `package.json` that matter here
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Regular and development dependency names
    pub fn package_names(&self) -> HashSet<String> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .cloned()
            .collect()
    }
}

/// The parts of a `tsconfig*.json` that matter here
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerOptions {
    /// Alias → targets, in file order
    #[serde(default)]
    pub paths: Option<IndexMap<String, Vec<String>>>,
}

impl TsConfig {
    /// `(alias, first target)` pairs in file order
    pub fn path_entries(&self) -> Vec<(String, String)> {
        self.compiler_options
            .as_ref()
            .and_then(|options| options.paths.as_ref())
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(|(alias, targets)| {
                        targets.first().map(|target| (alias.clone(), target.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

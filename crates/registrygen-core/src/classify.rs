//! Import edge classification
//!
//! Every import statement is resolved into exactly one [`Resolution`]:
//!
//! 1. **Package**: the root-relative specifier (before alias mapping) is a
//!    declared dependency name.
//! 2. **RegistryRef**: the mapped path belongs to a known registry and the
//!    registry's catalog lists the component.
//! 3. **LocalFiles**: every indexed file whose full path contains the mapped
//!    path. This is also the fallback when registry lookup finds nothing.
//! 4. **Unresolved**: a bare specifier with no local candidate.

use crate::catalog::{Registries, RegistryCatalogResolver};
use crate::imports::{ScannedImport, scan_imports};
use crate::mapping::PathMappings;
use crate::model::{FileRecord, ImportEdge, Resolution};
use crate::paths;
use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::debug;

/// Substring index over every discovered file
#[derive(Debug, Clone, Default)]
pub struct LocalFileIndex {
    entries: Vec<(String, String)>,
}

impl LocalFileIndex {
    pub fn new<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Self {
        Self {
            entries: records
                .into_iter()
                .map(|r| (r.full_path(), r.root_relative_path.clone()))
                .collect(),
        }
    }

    /// Root-relative paths of all files whose full path contains `needle`
    ///
    /// Containment covers extension and `/index.*` variants: `src/ui/card`
    /// finds `src/ui/card.tsx` as well as `src/ui/card/index.ts`.
    pub fn search(&self, needle: &str) -> IndexSet<String> {
        if needle.is_empty() {
            return IndexSet::new();
        }
        self.entries
            .iter()
            .filter(|(full, _)| full.contains(needle))
            .map(|(_, relative)| relative.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything needed to classify imports of one project
pub struct ModuleSpecifierClassifier<'a> {
    pub known_packages: &'a HashSet<String>,
    pub registries: &'a Registries,
    pub mappings: &'a PathMappings,
    pub file_index: &'a LocalFileIndex,
    pub catalog: &'a RegistryCatalogResolver,
}

impl ModuleSpecifierClassifier<'_> {
    /// Scan `content` and classify each of its imports
    pub async fn classify_file(&self, current_file: &FileRecord, content: &str) -> Vec<ImportEdge> {
        let mut edges = Vec::new();
        for import in scan_imports(content) {
            if let Some(edge) = self.classify(&import, current_file).await {
                edges.push(edge);
            }
        }
        edges
    }

    /// Classify a single import; imports without a specifier yield `None`
    pub async fn classify(
        &self,
        import: &ScannedImport,
        current_file: &FileRecord,
    ) -> Option<ImportEdge> {
        if import.specifier.is_empty() {
            return None;
        }

        let normalized = if paths::is_relative(&import.specifier) {
            paths::to_root_relative(&paths::resolve_relative(
                &import.specifier,
                &current_file.full_path(),
            ))
        } else {
            paths::to_root_relative(&import.specifier)
        };
        let resolved = self.mappings.resolve(&normalized);
        let resolution = self.resolve(&normalized, &resolved, &import.symbols).await;

        debug!(
            "{}: '{}' → {:?}",
            current_file.root_relative_path, import.specifier, resolution
        );

        Some(ImportEdge {
            raw_statement: import.statement.clone(),
            normalized_specifier: normalized,
            resolved_path: resolved,
            imported_symbols: import.symbols.clone(),
            resolution,
        })
    }

    async fn resolve(&self, normalized: &str, resolved: &str, symbols: &[String]) -> Resolution {
        if self.known_packages.contains(normalized) {
            return Resolution::Package(normalized.to_string());
        }

        if self.registries.find_by_key(resolved).is_some() {
            if let Some(reference) = self
                .catalog
                .resolve_registry_ref(resolved, self.registries, symbols)
                .await
            {
                return Resolution::RegistryRef(reference);
            }
            debug!("No registry match for '{}', searching local files", resolved);
        }

        let needle = resolved.strip_prefix("./").unwrap_or(resolved);
        let files = self.file_index.search(needle);
        if files.is_empty() && !is_project_path(resolved) {
            return Resolution::Unresolved;
        }
        Resolution::LocalFiles(files)
    }
}

/// Paths anchored in the project rather than bare module names
fn is_project_path(path: &str) -> bool {
    path.starts_with("./") || path.starts_with('/')
}

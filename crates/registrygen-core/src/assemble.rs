//! Manifest item assembly
//!
//! Turns each root-annotated file plus its closure into a [`RegistryItem`]
//! and collects the items into a [`RegistryDocument`].

use crate::closure::{Closure, FileGraph, close_over};
use crate::model::{
    AnalyzedFile, ComponentType, REGISTRY_SCHEMA_URL, RegistryDocument, RegistryFile,
    RegistryItem,
};
use crate::paths;
use indexmap::IndexMap;
use tracing::{debug, info};

/// Build the manifest item for `root`
///
/// The file list starts with the root itself, followed by the closure's
/// files and the root's declared resources. Entries are unique by path; the
/// first occurrence wins.
pub fn assemble(root: &AnalyzedFile, closure: &Closure, graph: &FileGraph<'_>) -> RegistryItem {
    let annotation = &root.annotation;
    let mut files: IndexMap<String, RegistryFile> = IndexMap::new();

    let mut push = |path: String, file_type: Option<ComponentType>| {
        files.entry(path.clone()).or_insert_with(|| RegistryFile {
            target: Some(paths::install_target(&path)),
            path,
            file_type,
        });
    };

    push(root.path().to_string(), Some(annotation.component_type));

    for path in &closure.files {
        let file_type = graph.get(path).map(|f| f.annotation.component_type);
        push(path.clone(), file_type);
    }

    for resource in &annotation.resource_paths {
        push(
            paths::resolve_relative(resource, root.path()),
            Some(ComponentType::File),
        );
    }

    RegistryItem {
        name: annotation.name.clone(),
        item_type: annotation.component_type,
        title: annotation.title.clone(),
        description: annotation.description.clone(),
        categories: annotation.categories.clone(),
        dependencies: closure.dependencies.iter().cloned().collect(),
        registry_dependencies: closure.registry_dependencies.iter().cloned().collect(),
        files: files.into_values().collect(),
    }
}

/// Assemble one item per root file, in input order
pub fn build_document(
    name: &str,
    homepage: Option<&str>,
    files: &[AnalyzedFile],
) -> RegistryDocument {
    let graph = FileGraph::new(files);
    let mut items = Vec::new();

    for root in files.iter().filter(|f| f.annotation.is_root) {
        let closure = close_over(root, &graph);
        debug!(
            "--- {} → {} files, {} dependencies, {} registry dependencies",
            root.path(),
            closure.files.len(),
            closure.dependencies.len(),
            closure.registry_dependencies.len()
        );
        items.push(assemble(root, &closure, &graph));
    }

    info!("Assembled {} registry items", items.len());

    RegistryDocument {
        schema: REGISTRY_SCHEMA_URL.to_string(),
        name: name.to_string(),
        homepage: homepage.map(str::to_string),
        items,
    }
}

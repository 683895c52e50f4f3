//! Data model shared by the resolution pipeline
//!
//! Input side: [`FileRecord`], [`Annotation`] and [`ImportEdge`] describe one
//! discovered source file after parsing. Output side: [`RegistryItem`] and
//! [`RegistryDocument`] are serialized verbatim into the manifest.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Schema URL stamped into every generated manifest
pub const REGISTRY_SCHEMA_URL: &str = "https://ui.shadcn.com/schema/registry.json";

/// Kind of a registry item or file entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComponentType {
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:page")]
    Page,
    #[default]
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:style")]
    Style,
    #[serde(rename = "registry:theme")]
    Theme,
    #[serde(rename = "registry:item")]
    Item,
}

impl ComponentType {
    pub const ALL: [ComponentType; 10] = [
        ComponentType::Block,
        ComponentType::Component,
        ComponentType::Lib,
        ComponentType::Hook,
        ComponentType::Ui,
        ComponentType::Page,
        ComponentType::File,
        ComponentType::Style,
        ComponentType::Theme,
        ComponentType::Item,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Block => "registry:block",
            ComponentType::Component => "registry:component",
            ComponentType::Lib => "registry:lib",
            ComponentType::Hook => "registry:hook",
            ComponentType::Ui => "registry:ui",
            ComponentType::Page => "registry:page",
            ComponentType::File => "registry:file",
            ComponentType::Style => "registry:style",
            ComponentType::Theme => "registry:theme",
            ComponentType::Item => "registry:item",
        }
    }

    /// Types whose file entries must carry an install target
    pub fn requires_target(&self) -> bool {
        matches!(self, ComponentType::File | ComponentType::Page)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown component type '{}'", s))
    }
}

/// One discovered file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub absolute_path: PathBuf,
    /// Path starting at the source root marker, e.g. `./src/ui/button.tsx`
    pub root_relative_path: String,
}

impl FileRecord {
    pub fn new(absolute_path: impl Into<PathBuf>) -> Self {
        let absolute_path = absolute_path.into();
        let root_relative_path =
            crate::paths::to_root_relative(&absolute_path.to_string_lossy().replace('\\', "/"));
        Self {
            absolute_path,
            root_relative_path,
        }
    }

    /// Full path as a forward-slash string, used for substring matching
    pub fn full_path(&self) -> String {
        self.absolute_path.to_string_lossy().replace('\\', "/")
    }
}

/// Leading-comment metadata of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub is_root: bool,
    pub component_type: ComponentType,
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub resource_paths: Vec<String>,
}

/// Where an import edge points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A declared package dependency
    Package(String),
    /// A component living in a foreign registry, already in its clean form
    RegistryRef(String),
    /// Local files by root-relative path; may be empty
    LocalFiles(IndexSet<String>),
    /// Bare specifier that matched nothing
    Unresolved,
}

/// One classified import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    pub raw_statement: String,
    /// Specifier after relative resolution and root truncation, before alias mapping
    pub normalized_specifier: String,
    pub resolved_path: String,
    pub imported_symbols: Vec<String>,
    pub resolution: Resolution,
}

/// A foreign registry, keyed by the local prefix its specifiers start with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDescriptor {
    pub url_prefix_key: String,
    pub target_prefix: Option<String>,
    pub catalog_url: Option<String>,
    pub auth_headers: BTreeMap<String, String>,
}

/// A file after annotation and import parsing
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub record: FileRecord,
    pub annotation: Annotation,
    pub imports: Vec<ImportEdge>,
}

impl AnalyzedFile {
    pub fn path(&self) -> &str {
        &self.record.root_relative_path
    }
}

/// One entry of an item's `files` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    pub path: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<ComponentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One manifest item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    #[serde(default)]
    pub files: Vec<RegistryFile>,
}

/// The manifest document written as `registry.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    pub items: Vec<RegistryItem>,
}

/// Item of a remote catalog, as far as resolution cares
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub files: Vec<CatalogFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub path: String,
}

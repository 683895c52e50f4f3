//! Resolution engine behind `registrygen`
//!
//! Takes parsed source files, classifies every import into a package,
//! foreign registry component, or local file set, and assembles the
//! transitive closure of each root-annotated file into a manifest item.

pub mod annotation;
pub mod assemble;
pub mod catalog;
pub mod classify;
pub mod closure;
pub mod error;
pub mod imports;
pub mod mapping;
pub mod model;
pub mod paths;

pub use annotation::parse_annotation;
pub use assemble::{assemble, build_document};
pub use catalog::{
    CatalogCache, CatalogTransport, HttpCatalogTransport, Registries, RegistryCatalogResolver,
};
pub use classify::{LocalFileIndex, ModuleSpecifierClassifier};
pub use closure::{Closure, FileGraph, close_over};
pub use error::{ResolveError, Result};
pub use mapping::PathMappings;
pub use model::*;

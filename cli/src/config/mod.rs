//! Configuration management for registrygen
//!
//! A run reads three kinds of JSON files, each found by searching upward from
//! the scan directory.
//!
//! ## Architecture
//!
//! - `schema` - Configuration data structures
//! - `io` - Discovery and loading
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registrygen::config;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let dir = Path::new("./src/registry");
//! let generator = config::load_generator_config(dir)?;
//! let packages = config::load_package_manifest(dir)?.package_names();
//! let mappings = config::load_path_mappings(dir)?;
//! # Ok(())
//! # }
//! ```

pub mod io;
pub mod schema;

pub use io::{
    GENERATOR_CONFIG_FILE, PACKAGE_MANIFEST_FILE, load_generator_config, load_package_manifest,
    load_path_mappings, read_nearest_json,
};
pub use schema::{GeneratorConfig, KnownRegistry, PackageManifest, TsConfig};

pub mod config;
pub mod enrich;
pub mod generate;
pub mod logging;
pub mod scan;
pub mod validate;

pub use generate::{GenerateOptions, generate, generate_with};

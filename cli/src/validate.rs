//! Validation of the assembled document
//!
//! Two layers run before anything is written. Structural checks cover the
//! shape consumers of `registry.json` rely on. The JSON Schema named by the
//! document's `$schema` is then fetched and applied with `jsonschema`. Each
//! problem is reported with a JSON-pointer style location.

use anyhow::{Context, Result};
use registrygen_core::RegistryDocument;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

const SCHEMA_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Location in the document, e.g. `/items/2/name`; empty for the root
    pub instance_path: String,
    pub message: String,
}

impl ValidationError {
    fn new(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            &self.instance_path
        };
        write!(f, "- {} {}", path, self.message)
    }
}

/// Check the structure of `document`, returning every problem found
pub fn validate_document(document: &RegistryDocument) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if document.schema.is_empty() {
        errors.push(ValidationError::new("/$schema", "must not be empty"));
    }
    if document.name.is_empty() {
        errors.push(ValidationError::new("/name", "must not be empty"));
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (i, item) in document.items.iter().enumerate() {
        match item.name.as_deref() {
            None => errors.push(ValidationError::new(
                format!("/items/{}", i),
                "must have required property 'name'",
            )),
            Some("") => errors.push(ValidationError::new(
                format!("/items/{}/name", i),
                "must not be empty",
            )),
            Some(name) => {
                if let Some(first) = seen.insert(name, i) {
                    errors.push(ValidationError::new(
                        format!("/items/{}/name", i),
                        format!("duplicates the name of /items/{}", first),
                    ));
                }
            }
        }

        for (j, file) in item.files.iter().enumerate() {
            let location = format!("/items/{}/files/{}", i, j);
            if file.path.is_empty() {
                errors.push(ValidationError::new(
                    format!("{}/path", location),
                    "must not be empty",
                ));
            }
            match file.file_type {
                None => errors.push(ValidationError::new(
                    location,
                    "must have required property 'type'",
                )),
                Some(file_type) => {
                    if file_type.requires_target()
                        && file.target.as_deref().is_none_or(str::is_empty)
                    {
                        errors.push(ValidationError::new(
                            location,
                            format!("must have required property 'target' for {}", file_type),
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate `document` against the JSON Schema its `$schema` points to
///
/// A schema that cannot be fetched or compiled is logged and skipped, so
/// generation still works offline.
pub async fn validate_against_remote_schema(
    document: &RegistryDocument,
) -> Result<(), Vec<ValidationError>> {
    let instance = match serde_json::to_value(document) {
        Ok(instance) => instance,
        Err(e) => return Err(vec![ValidationError::new("", e.to_string())]),
    };

    let schema = match fetch_schema(&document.schema).await {
        Ok(schema) => schema,
        Err(e) => {
            warn!("Skipping JSON Schema validation: {:#}", e);
            return Ok(());
        }
    };

    // Remote `$ref`s are resolved with blocking HTTP inside jsonschema
    let outcome = tokio::task::spawn_blocking(move || schema_errors(&schema, &instance)).await;
    match outcome {
        Ok(Ok(errors)) if errors.is_empty() => Ok(()),
        Ok(Ok(errors)) => Err(errors),
        Ok(Err(e)) => {
            warn!("Skipping JSON Schema validation: {:#}", e);
            Ok(())
        }
        Err(e) => {
            warn!("Skipping JSON Schema validation: {}", e);
            Ok(())
        }
    }
}

async fn fetch_schema(url: &str) -> Result<Value> {
    debug!("Fetching JSON Schema from {}", url);
    let client = reqwest::Client::builder()
        .timeout(SCHEMA_FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let response = client
        .get(url)
        .send()
        .await
        .context(format!("Failed to fetch schema {}", url))?
        .error_for_status()
        .context(format!("Failed to fetch schema {}", url))?;
    response
        .json()
        .await
        .context(format!("Failed to parse schema {}", url))
}

/// Every violation of `schema` in `instance`; errors if the schema does not compile
pub fn schema_errors(schema: &Value, instance: &Value) -> Result<Vec<ValidationError>> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| anyhow::anyhow!("Invalid JSON Schema: {}", e))?;
    Ok(validator
        .iter_errors(instance)
        .map(|error| ValidationError::new(error.instance_path.to_string(), error.to_string()))
        .collect())
}

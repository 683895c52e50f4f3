//! Enrichment pass: annotations and classified imports per source file

use crate::config::GeneratorConfig;
use anyhow::Result;
use futures_util::future;
use registrygen_core::{AnalyzedFile, FileRecord, ModuleSpecifierClassifier, parse_annotation};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Parse every file with an allowed extension
///
/// Files are read and classified concurrently; the result keeps scan order.
/// Files with other extensions are left out here but stay in the local file
/// index the classifier searches. An unreadable file is logged and skipped.
pub async fn enrich_files(
    files: &[FileRecord],
    config: &GeneratorConfig,
    classifier: &ModuleSpecifierClassifier<'_>,
) -> Result<Vec<AnalyzedFile>> {
    let tasks: Vec<_> = files
        .iter()
        .filter(|record| {
            let allowed = config.is_allowed(&record.absolute_path);
            if !allowed {
                debug!("Skipping file {}", record.absolute_path.display());
            }
            allowed
        })
        .map(|record| enrich_file(record, classifier))
        .collect();

    Ok(future::join_all(tasks).await.into_iter().flatten().collect())
}

async fn enrich_file(
    record: &FileRecord,
    classifier: &ModuleSpecifierClassifier<'_>,
) -> Option<AnalyzedFile> {
    debug!("Enriching file {}", record.absolute_path.display());

    let bytes = match tokio::fs::read(&record.absolute_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping {}: {}", record.absolute_path.display(), e);
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = content {
        warn!(
            "{} is not valid UTF-8; invalid bytes were replaced",
            record.absolute_path.display()
        );
    }

    let annotation = parse_annotation(&content);
    let imports = classifier.classify_file(record, &content).await;

    Some(AnalyzedFile {
        record: record.clone(),
        annotation,
        imports,
    })
}

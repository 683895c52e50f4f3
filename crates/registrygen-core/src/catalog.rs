//! Foreign registry resolution
//!
//! A specifier that starts with a known registry key is rewritten to that
//! registry's target prefix and looked up in the registry's published
//! catalog (`registry.json`). Catalogs are downloaded at most once per run:
//! the first request for a URL stores a shared future and every later
//! request, concurrent or not, awaits that same future.

use crate::error::{ResolveError, Result};
use crate::model::{CatalogEntry, RegistryDescriptor};
use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// File name appended to catalog URLs that do not already name it
pub const MANIFEST_FILE_NAME: &str = "registry.json";

/// Registry prefix resolved locally, without a catalog download
pub const SHORTHAND_PREFIX: &str = "@shadcn/";

/// Transport used to download a registry catalog
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch the catalog at `url` and return its items
    async fn fetch_catalog(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Vec<CatalogEntry>>;
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    items: Vec<CatalogEntry>,
}

/// HTTP transport backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpCatalogTransport {
    client: reqwest::Client,
}

impl HttpCatalogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalogTransport {
    #[instrument(skip(self, headers), fields(url = %url))]
    async fn fetch_catalog(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Vec<CatalogEntry>> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        debug!("Sending HTTP GET request");
        let response = request.send().await.map_err(|source| ResolveError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ResolveError::Http {
            url: url.to_string(),
            source,
        })?;
        let document: CatalogDocument =
            serde_json::from_slice(&body).map_err(|e| ResolveError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Catalog lists {} items", document.items.len());
        Ok(document.items)
    }
}

type Catalog = Arc<Vec<CatalogEntry>>;
type PendingCatalog = Shared<BoxFuture<'static, Option<Catalog>>>;

/// Single-flight catalog cache keyed by normalized URL
///
/// Failures are cached as `None` just like successes, so a broken registry
/// costs one request per run.
pub struct CatalogCache {
    transport: Arc<dyn CatalogTransport>,
    pending: Mutex<HashMap<String, PendingCatalog>>,
}

impl CatalogCache {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self {
            transport,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Load the catalog behind `url`, sharing any fetch already started
    pub async fn load(&self, url: &str, headers: &BTreeMap<String, String>) -> Option<Catalog> {
        let url = normalize_catalog_url(url);

        let pending = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            pending
                .entry(url.clone())
                .or_insert_with(|| {
                    let transport = Arc::clone(&self.transport);
                    let headers = headers.clone();
                    async move {
                        info!("Downloading registry catalog {}", url);
                        match transport.fetch_catalog(&url, &headers).await {
                            Ok(items) => Some(Arc::new(items)),
                            Err(e) => {
                                warn!("Unable to download registry catalog from {}: {}", url, e);
                                None
                            }
                        }
                    }
                    .boxed()
                    .shared()
                })
                .clone()
        };

        pending.await
    }
}

/// The set of known foreign registries
#[derive(Debug, Clone, Default)]
pub struct Registries {
    descriptors: Vec<RegistryDescriptor>,
}

impl Registries {
    pub fn new(descriptors: impl IntoIterator<Item = RegistryDescriptor>) -> Self {
        Self {
            descriptors: descriptors.into_iter().collect(),
        }
    }

    /// Descriptor whose key prefixes `path`, longest key first
    ///
    /// A key only matches at a segment boundary: `@shadcn2/x` does not belong
    /// to a registry keyed `@shadcn`.
    pub fn find_by_key(&self, path: &str) -> Option<&RegistryDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| prefix_matches(path, &d.url_prefix_key))
            .max_by_key(|d| d.url_prefix_key.len())
    }

    /// Drop the registry keyed exactly by `key`
    pub fn remove_key(&mut self, key: &str) -> Option<RegistryDescriptor> {
        let index = self.descriptors.iter().position(|d| d.url_prefix_key == key)?;
        Some(self.descriptors.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn prefix_matches(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

/// Resolves registry-prefixed specifiers against remote catalogs
pub struct RegistryCatalogResolver {
    cache: CatalogCache,
}

impl RegistryCatalogResolver {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self {
            cache: CatalogCache::new(transport),
        }
    }

    /// Resolver using the default HTTP transport
    pub fn http() -> Self {
        Self::new(Arc::new(HttpCatalogTransport::new()))
    }

    /// Map `resolved_path` to a clean registry reference such as `@acme/card`
    ///
    /// Returns `None` when no registry claims the path, the registry has no
    /// target prefix or catalog, the catalog cannot be downloaded, or no
    /// catalog item carries the requested name.
    #[instrument(skip(self, registries, imported_symbols))]
    pub async fn resolve_registry_ref(
        &self,
        resolved_path: &str,
        registries: &Registries,
        imported_symbols: &[String],
    ) -> Option<String> {
        let descriptor = registries.find_by_key(resolved_path)?;
        let Some(target_prefix) = descriptor.target_prefix.as_deref() else {
            debug!(
                "Registry '{}' has no target prefix",
                descriptor.url_prefix_key
            );
            return None;
        };

        let replaced = format!(
            "{}{}",
            target_prefix,
            &resolved_path[descriptor.url_prefix_key.len()..]
        );
        let candidate = replaced.strip_prefix('/').unwrap_or(&replaced);
        if candidate.is_empty() {
            return None;
        }

        if let Some(component) = candidate.strip_prefix(SHORTHAND_PREFIX) {
            return Some(component.to_string());
        }

        let url = descriptor.catalog_url.as_deref()?;
        let catalog = self.cache.load(url, &descriptor.auth_headers).await?;
        if catalog.is_empty() {
            return None;
        }

        let requested = trailing_segment(candidate);
        debug!(
            "Looking up '{}' in {} (imports: {:?})",
            requested, url, imported_symbols
        );

        // Exact name first, then the kebab-case form (`DataTable` -> `data-table`)
        let names = || catalog.iter().filter_map(|item| item.name.as_deref());
        let matched = names().find(|name| *name == requested).or_else(|| {
            let normalized = normalize_component_name(requested)?;
            names().find(|name| *name == normalized)
        })?;

        Some(compose_reference(target_prefix, matched))
    }
}

/// Strip trailing slashes and make sure the URL names the manifest file
pub fn normalize_catalog_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with(MANIFEST_FILE_NAME) {
        trimmed.to_string()
    } else {
        format!("{}/{}", trimmed, MANIFEST_FILE_NAME)
    }
}

fn trailing_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

fn compose_reference(registry: &str, component: &str) -> String {
    format!(
        "{}/{}",
        registry.trim_end_matches('/'),
        component.trim_start_matches('/')
    )
}

/// Kebab-case form of a component name: `DataTable.tsx` → `data-table`
fn normalize_component_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stem = match trimmed.rfind('.') {
        Some(index) => &trimmed[..index],
        None => trimmed,
    };

    let mut normalized = String::with_capacity(stem.len() + 4);
    let mut previous: Option<char> = None;
    for c in stem.chars() {
        let separator = c == '_' || c == '-' || c.is_whitespace();
        if separator {
            if !normalized.is_empty() && !normalized.ends_with('-') {
                normalized.push('-');
            }
        } else {
            if c.is_uppercase()
                && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
                && !normalized.ends_with('-')
            {
                normalized.push('-');
            }
            normalized.extend(c.to_lowercase());
        }
        previous = Some(c);
    }

    (!normalized.is_empty()).then_some(normalized)
}

//! Specifier alias mapping
//!
//! Aliases come from the project's path configuration as `alias → target`
//! pairs such as `"@/*" → "./src/*"`. The table is normalized once and then
//! applied to every specifier with a first-match scan over aliases sorted
//! longest first.

use tracing::debug;

/// One `alias → target` prefix rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    pub alias: String,
    pub target: String,
}

/// Root alias; keeps its trailing slash so `@/x` never matches `@xyz`
const ROOT_ALIAS: &str = "@/*";

/// Ordered alias table, longest alias first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMappings {
    mappings: Vec<PathMapping>,
}

impl PathMappings {
    /// Build the table from raw configuration entries
    ///
    /// Wildcards are stripped from both sides. `@/*` collapses to `@/` with a
    /// target ending in `/`; every other alias and target loses its trailing
    /// slashes. Exact duplicate pairs are dropped and the result is sorted by
    /// alias length, longest first, keeping configuration order among ties.
    pub fn from_entries<I, A, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: AsRef<str>,
        T: AsRef<str>,
    {
        let mut mappings: Vec<PathMapping> = Vec::new();

        for (alias, target) in entries {
            let (alias, target) = (alias.as_ref(), target.as_ref());
            let mapping = if alias == ROOT_ALIAS {
                PathMapping {
                    alias: "@/".to_string(),
                    target: format!("{}/", strip_wildcards(target).trim_end_matches('/')),
                }
            } else {
                PathMapping {
                    alias: strip_wildcards(alias).trim_end_matches('/').to_string(),
                    target: strip_wildcards(target).trim_end_matches('/').to_string(),
                }
            };

            // An empty alias would prefix-match every specifier
            if mapping.alias.is_empty() {
                debug!("Ignoring catch-all path mapping '{}' → '{}'", alias, target);
                continue;
            }

            if !mappings.contains(&mapping) {
                mappings.push(mapping);
            }
        }

        mappings.sort_by(|a, b| b.alias.len().cmp(&a.alias.len()));
        Self { mappings }
    }

    /// Rewrite the alias portion of `specifier` using the first matching alias
    ///
    /// Returns the specifier unchanged when no alias is a prefix of it.
    pub fn resolve(&self, specifier: &str) -> String {
        for mapping in &self.mappings {
            if let Some(rest) = specifier.strip_prefix(mapping.alias.as_str()) {
                return format!("{}{}", mapping.target, rest);
            }
        }
        specifier.to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

fn strip_wildcards(value: &str) -> String {
    value.replace('*', "")
}

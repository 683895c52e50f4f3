//! Transitive closure over local imports
//!
//! Starting from a root file, local-file edges are followed with an explicit
//! worklist until no unvisited file remains. Package and registry edges are
//! collected along the way. Files are processed in discovery order, which
//! keeps the resulting `files` list stable.

use crate::model::{AnalyzedFile, ImportEdge, Resolution};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Lookup of analyzed files by root-relative path
pub struct FileGraph<'a> {
    files: HashMap<&'a str, &'a AnalyzedFile>,
}

impl<'a> FileGraph<'a> {
    pub fn new(files: &'a [AnalyzedFile]) -> Self {
        Self {
            files: files.iter().map(|f| (f.path(), f)).collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&'a AnalyzedFile> {
        self.files.get(path).copied()
    }
}

/// Everything a root file transitively needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    pub dependencies: IndexSet<String>,
    pub registry_dependencies: IndexSet<String>,
    /// Local files in discovery order
    pub files: IndexSet<String>,
}

impl Closure {
    fn absorb(&mut self, edges: &[ImportEdge], worklist: &mut VecDeque<String>) {
        for edge in edges {
            match &edge.resolution {
                Resolution::Package(name) => {
                    self.dependencies.insert(name.clone());
                }
                Resolution::RegistryRef(reference) => {
                    self.registry_dependencies.insert(reference.clone());
                }
                Resolution::LocalFiles(paths) => {
                    for path in paths {
                        if self.files.insert(path.clone()) {
                            worklist.push_back(path.clone());
                        }
                    }
                }
                Resolution::Unresolved => {}
            }
        }
    }
}

/// Compute the closure of `root` over `graph`
///
/// Files reachable through local edges are expanded once each; cycles,
/// including ones leading back to the root, terminate because visited files
/// are never re-expanded.
pub fn close_over(root: &AnalyzedFile, graph: &FileGraph<'_>) -> Closure {
    let mut closure = Closure::default();
    let mut worklist = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();

    visited.insert(root.path().to_string());
    closure.absorb(&root.imports, &mut worklist);

    while let Some(path) = worklist.pop_front() {
        if !visited.insert(path.clone()) {
            continue;
        }
        match graph.get(&path) {
            Some(file) => {
                debug!("+ {}", path);
                closure.absorb(&file.imports, &mut worklist);
            }
            None => debug!("No import data for {}", path),
        }
    }

    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotation, FileRecord};

    fn edge(resolution: Resolution) -> ImportEdge {
        ImportEdge {
            raw_statement: String::new(),
            normalized_specifier: String::new(),
            resolved_path: String::new(),
            imported_symbols: vec![],
            resolution,
        }
    }

    fn local(paths: &[&str]) -> ImportEdge {
        edge(Resolution::LocalFiles(
            paths.iter().map(|p| p.to_string()).collect(),
        ))
    }

    fn file(path: &str, imports: Vec<ImportEdge>) -> AnalyzedFile {
        AnalyzedFile {
            record: FileRecord {
                absolute_path: format!("/work{}", &path[1..]).into(),
                root_relative_path: path.to_string(),
            },
            annotation: Annotation::default(),
            imports,
        }
    }

    #[test]
    fn test_transitive_expansion() {
        let files = vec![
            file("./src/root.tsx", vec![local(&["./src/button.tsx"])]),
            file(
                "./src/button.tsx",
                vec![
                    edge(Resolution::Package("react".to_string())),
                    edge(Resolution::RegistryRef("card".to_string())),
                    local(&["./src/lib/utils.ts"]),
                ],
            ),
            file(
                "./src/lib/utils.ts",
                vec![edge(Resolution::Package("clsx".to_string()))],
            ),
        ];
        let graph = FileGraph::new(&files);
        let closure = close_over(&files[0], &graph);

        let paths: Vec<_> = closure.files.iter().map(String::as_str).collect();
        assert_eq!(paths, vec!["./src/button.tsx", "./src/lib/utils.ts"]);
        let deps: Vec<_> = closure.dependencies.iter().map(String::as_str).collect();
        assert_eq!(deps, vec!["react", "clsx"]);
        assert!(closure.registry_dependencies.contains("card"));
    }

    #[test]
    fn test_cycles_terminate() {
        let files = vec![
            file("./src/a.ts", vec![local(&["./src/b.ts"])]),
            file("./src/b.ts", vec![local(&["./src/c.ts"])]),
            file("./src/c.ts", vec![local(&["./src/a.ts", "./src/b.ts"])]),
        ];
        let graph = FileGraph::new(&files);
        let closure = close_over(&files[0], &graph);

        let paths: Vec<_> = closure.files.iter().map(String::as_str).collect();
        assert_eq!(paths, vec!["./src/b.ts", "./src/c.ts", "./src/a.ts"]);
    }

    #[test]
    fn test_closure_is_idempotent() {
        let files = vec![
            file("./src/a.ts", vec![local(&["./src/b.ts", "./src/c.ts"])]),
            file("./src/b.ts", vec![local(&["./src/c.ts"])]),
            file(
                "./src/c.ts",
                vec![edge(Resolution::Package("react".to_string()))],
            ),
        ];
        let graph = FileGraph::new(&files);
        assert_eq!(close_over(&files[0], &graph), close_over(&files[0], &graph));
    }

    #[test]
    fn test_duplicate_edges_record_one_file() {
        let files = vec![
            file(
                "./src/a.ts",
                vec![local(&["./src/b.ts"]), local(&["./src/b.ts"])],
            ),
            file("./src/b.ts", vec![]),
        ];
        let graph = FileGraph::new(&files);
        let closure = close_over(&files[0], &graph);
        assert_eq!(closure.files.len(), 1);
    }

    #[test]
    fn test_unknown_local_files_are_kept_but_not_expanded() {
        let files = vec![file("./src/a.ts", vec![local(&["./src/styles.css"])])];
        let graph = FileGraph::new(&files);
        let closure = close_over(&files[0], &graph);
        assert!(closure.files.contains("./src/styles.css"));
    }

    #[test]
    fn test_unresolved_edges_contribute_nothing() {
        let files = vec![file("./src/a.ts", vec![edge(Resolution::Unresolved)])];
        let graph = FileGraph::new(&files);
        assert_eq!(close_over(&files[0], &graph), Closure::default());
    }
}

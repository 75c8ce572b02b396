//! Incremental graph-construction algorithm.

use crate::change_cache::ChangeCache;
use crate::error::{DepGraphError, Result};
use crate::graph::Graph;
use std::path::{Path, PathBuf};

/// The dependency extractor collaborator: given a single source file,
/// return the resolved absolute paths of its direct imports.
///
/// Implementations must be pure with respect to disk contents at call time
/// and must not return external-package paths; the core also defensively
/// filters those.
pub trait DependencyExtractor {
    fn extract(&self, filename: &Path, cwd: &Path) -> anyhow::Result<Vec<PathBuf>>;
}

/// Platform marker for external-package directories, filtered
/// unconditionally regardless of what the extractor returns.
const EXTERNAL_PACKAGE_MARKER: &str = "node_modules";

fn is_external_package_path(path: &Path) -> bool {
    let marker = std::ffi::OsStr::new(EXTERNAL_PACKAGE_MARKER);
    path.components().any(|c| c.as_os_str() == marker)
}

/// Drives incremental population of a [`Graph`] from a set of start nodes.
pub struct Populator<'a> {
    extractor: &'a dyn DependencyExtractor,
}

impl<'a> Populator<'a> {
    pub fn new(extractor: &'a dyn DependencyExtractor) -> Self {
        Self { extractor }
    }

    /// Run the traversal starting from `start`, against `change_cache` to
    /// decide which nodes need re-extraction.
    ///
    /// `force`: when true, the extractor is consulted for every node
    /// visited regardless of the change-cache verdict (used on cold start
    /// and whenever a caller cannot trust cached children).
    pub fn populate(
        &self,
        graph: &mut Graph,
        change_cache: &dyn ChangeCache,
        start: &[PathBuf],
        force: bool,
    ) -> Result<()> {
        let cwd = graph.cwd.clone();

        // (node filename, entry anchor) — entry anchor is the entry file a
        // node was reached from, if any, propagated to children so their
        // `entry_files` set can be updated.
        let mut stack: Vec<(PathBuf, Option<PathBuf>)> = Vec::new();
        let mut seen: rustc_hash::FxHashSet<PathBuf> = rustc_hash::FxHashSet::default();

        for filename in start {
            let anchor = graph.entry_files.contains(filename).then(|| filename.clone());
            stack.push((filename.clone(), anchor));
            seen.insert(filename.clone());
        }

        while let Some((filename, entry_anchor)) = stack.pop() {
            // Always query the change cache, even when `force` already
            // decides the outcome: this is how the cache's default
            // implementation learns which paths exist to snapshot on the
            // next `reconcile`.
            let changed = change_cache.has_changed(&filename);
            let should_extract = force || changed;

            let children: Vec<PathBuf> = if should_extract {
                let extracted = {
                    let _span = tracing::debug_span!("extract", file = %filename.display()).entered();
                    self.extractor
                        .extract(&filename, &cwd)
                        .map_err(|source| DepGraphError::ExtractorFailure {
                            path: filename.clone(),
                            source,
                        })?
                };
                extracted
                    .into_iter()
                    .filter(|p| !p.as_os_str().is_empty())
                    .filter(|p| {
                        if is_external_package_path(p) {
                            tracing::debug!(path = %p.display(), "filtering external-package dependency");
                            false
                        } else {
                            true
                        }
                    })
                    .filter(|p| {
                        if graph.is_ignored(p) {
                            tracing::debug!(path = %p.display(), "filtering ignored dependency");
                            false
                        } else {
                            true
                        }
                    })
                    .collect()
            } else {
                graph
                    .get(&filename)
                    .map(|node| node.children.iter().cloned().collect())
                    .unwrap_or_default()
            };

            {
                let node = graph.get_or_create(&filename);
                node.children = children.iter().cloned().collect();
            }

            for child_filename in &children {
                let child = graph.get_or_create(child_filename);
                if let Some(anchor) = &entry_anchor {
                    child.entry_files.insert(anchor.clone());
                }
                child.parents.insert(filename.clone());

                if seen.insert(child_filename.clone()) {
                    stack.push((child_filename.clone(), entry_anchor.clone()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_cache::FileChangeCache;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct FixedExtractor {
        edges: HashMap<PathBuf, Vec<PathBuf>>,
    }

    impl DependencyExtractor for FixedExtractor {
        fn extract(&self, filename: &Path, _cwd: &Path) -> anyhow::Result<Vec<PathBuf>> {
            Ok(self.edges.get(filename).cloned().unwrap_or_default())
        }
    }

    fn change_cache(dir: &TempDir) -> FileChangeCache {
        FileChangeCache::open(dir.path().join("file-entry.cache.json")).unwrap()
    }

    #[test]
    fn simple_chain_sets_entry_files_and_parents() {
        let dir = TempDir::new().unwrap();
        let a = PathBuf::from("/p/a.ts");
        let b = PathBuf::from("/p/b.ts");

        let mut edges = HashMap::new();
        edges.insert(a.clone(), vec![b.clone()]);
        let extractor = FixedExtractor { edges };

        let mut graph = Graph::new("/p");
        graph.entry_files.insert(a.clone());
        graph.get_or_create(&a);

        let populator = Populator::new(&extractor);
        populator
            .populate(&mut graph, &change_cache(&dir), &[a.clone()], true)
            .unwrap();

        assert!(graph.get(&a).unwrap().children.contains(&b));
        assert!(graph.get(&b).unwrap().parents.contains(&a));
        assert!(graph.get(&b).unwrap().entry_files.contains(&a));
        assert!(graph.get(&a).unwrap().entry_files.is_empty());
    }

    #[test]
    fn diamond_accumulates_both_entry_anchors() {
        let dir = TempDir::new().unwrap();
        let e1 = PathBuf::from("/p/e1.ts");
        let e2 = PathBuf::from("/p/e2.ts");
        let shared = PathBuf::from("/p/shared.ts");

        let mut edges = HashMap::new();
        edges.insert(e1.clone(), vec![shared.clone()]);
        edges.insert(e2.clone(), vec![shared.clone()]);
        let extractor = FixedExtractor { edges };

        let mut graph = Graph::new("/p");
        graph.entry_files.insert(e1.clone());
        graph.entry_files.insert(e2.clone());
        graph.get_or_create(&e1);
        graph.get_or_create(&e2);

        let populator = Populator::new(&extractor);
        populator
            .populate(
                &mut graph,
                &change_cache(&dir),
                &[e1.clone(), e2.clone()],
                true,
            )
            .unwrap();

        let shared_node = graph.get(&shared).unwrap();
        assert!(shared_node.entry_files.contains(&e1));
        assert!(shared_node.entry_files.contains(&e2));
    }

    #[test]
    fn cycle_terminates() {
        let dir = TempDir::new().unwrap();
        let a = PathBuf::from("/p/a.ts");
        let b = PathBuf::from("/p/b.ts");
        let c = PathBuf::from("/p/c.ts");

        let mut edges = HashMap::new();
        edges.insert(a.clone(), vec![b.clone()]);
        edges.insert(b.clone(), vec![c.clone()]);
        edges.insert(c.clone(), vec![a.clone()]);
        let extractor = FixedExtractor { edges };

        let mut graph = Graph::new("/p");
        graph.entry_files.insert(a.clone());
        graph.get_or_create(&a);

        let populator = Populator::new(&extractor);
        populator
            .populate(&mut graph, &change_cache(&dir), &[a.clone()], true)
            .unwrap();

        assert_eq!(graph.len(), 3);
        assert!(graph.get(&a).unwrap().parents.contains(&c));
    }

    #[test]
    fn external_package_paths_are_filtered() {
        let dir = TempDir::new().unwrap();
        let a = PathBuf::from("/p/a.ts");
        let pkg = PathBuf::from("/p/node_modules/pkg/index.ts");

        let mut edges = HashMap::new();
        edges.insert(a.clone(), vec![pkg.clone()]);
        let extractor = FixedExtractor { edges };

        let mut graph = Graph::new("/p");
        graph.get_or_create(&a);

        let populator = Populator::new(&extractor);
        populator
            .populate(&mut graph, &change_cache(&dir), &[a.clone()], true)
            .unwrap();

        assert!(graph.get(&a).unwrap().children.is_empty());
        assert!(graph.get(&pkg).is_none());
    }

    #[test]
    fn ignored_pattern_is_filtered_like_an_external_package() {
        let dir = TempDir::new().unwrap();
        let a = PathBuf::from("/p/a.ts");
        let generated = PathBuf::from("/p/a.generated.ts");

        let mut edges = HashMap::new();
        edges.insert(a.clone(), vec![generated.clone()]);
        let extractor = FixedExtractor { edges };

        let mut graph = Graph::new("/p");
        graph.set_ignored(vec!["**/*.generated.ts".to_string()]);
        graph.get_or_create(&a);

        let populator = Populator::new(&extractor);
        populator
            .populate(&mut graph, &change_cache(&dir), &[a.clone()], true)
            .unwrap();

        assert!(graph.get(&a).unwrap().children.is_empty());
        assert!(graph.get(&generated).is_none());
    }

    #[test]
    fn unforced_populate_reuses_cached_children_when_unchanged() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.ts");
        let b = dir.path().join("b.ts");
        std::fs::write(&a, "import b").unwrap();
        std::fs::write(&b, "").unwrap();

        let mut edges = HashMap::new();
        edges.insert(a.clone(), vec![b.clone()]);
        let extractor = FixedExtractor { edges };

        let mut cache = change_cache(&dir);
        cache.track(&a);
        cache.reconcile(false).unwrap();

        let mut graph = Graph::new(dir.path());
        graph.get_or_create(&a).children.insert(b.clone());
        graph.get_or_create(&b).parents.insert(a.clone());

        let populator = Populator::new(&extractor);
        populator
            .populate(&mut graph, &cache, &[a.clone()], false)
            .unwrap();

        assert!(graph.get(&a).unwrap().children.contains(&b));
    }
}

//! The in-memory bidirectional dependency graph.

use crate::error::{DepGraphError, Result};
use crate::graph_cache::GraphCache;
use crate::node::{Node, SerializedNode};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// `filename -> Node`, plus the entry-file roster and resolution anchor.
///
/// Bidirectional edge consistency is enforced by [`Graph::delete`] and by
/// the [`crate::populator::Populator`], which is the only code path
/// permitted to add edges — `set` is deliberately a low-level operation
/// that does not synchronize back-edges.
pub struct Graph {
    nodes: FxHashMap<PathBuf, Node>,
    pub entry_files: FxHashSet<PathBuf>,
    ignored_patterns: Vec<String>,
    ignored_set: globset::GlobSet,
    pub cwd: PathBuf,
}

impl Graph {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            nodes: FxHashMap::default(),
            entry_files: FxHashSet::default(),
            ignored_patterns: Vec::new(),
            ignored_set: globset::GlobSet::empty(),
            cwd: cwd.into(),
        }
    }

    /// Compile `patterns` into a matcher consulted by the populator when
    /// deciding whether a resolved dependency should be added as an edge.
    /// Patterns that fail to compile are dropped rather than rejecting the
    /// whole set.
    pub fn set_ignored(&mut self, patterns: Vec<String>) {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &patterns {
            if let Ok(glob) = globset::GlobBuilder::new(pattern)
                .literal_separator(false)
                .build()
            {
                builder.add(glob);
            } else {
                tracing::warn!(pattern, "ignoring malformed ignore pattern");
            }
        }
        self.ignored_set = builder.build().unwrap_or_else(|_| globset::GlobSet::empty());
        self.ignored_patterns = patterns;
    }

    pub fn ignored_patterns(&self) -> &[String] {
        &self.ignored_patterns
    }

    /// Whether `path` matches one of the compiled ignore patterns.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignored_set.is_match(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, filename: &Path) -> Option<&Node> {
        self.nodes.get(filename)
    }

    pub fn contains(&self, filename: &Path) -> bool {
        self.nodes.contains_key(filename)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.nodes.keys().cloned().collect()
    }

    /// Low-level insert/replace. Does not synchronize parent/child
    /// back-edges on adjacent nodes — the caller (the populator) owns that,
    /// since only it has the full picture of what edges it is adding.
    pub fn set(&mut self, node: Node) {
        self.nodes.insert(node.filename.clone(), node);
    }

    /// Fetch the node for `filename`, creating an empty one if absent.
    pub fn get_or_create(&mut self, filename: &Path) -> &mut Node {
        self.nodes
            .entry(filename.to_path_buf())
            .or_insert_with(|| Node::new(filename))
    }

    /// Resolve `filename` to the graph's `entry_files` roster, creating a
    /// node for it if one does not already exist.
    ///
    /// Returns `true` when a new node was created (the caller must then run
    /// the populator on it), `false` when membership was merely recorded.
    pub fn ensure_entry_file(&mut self, filename: PathBuf) -> bool {
        let is_new = !self.nodes.contains_key(&filename);
        self.entry_files.insert(filename.clone());
        if is_new {
            self.set(Node::new(filename));
        }
        is_new
    }

    /// Resolve a possibly-relative path against `cwd`.
    pub fn resolve_absolute(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() {
            return Err(DepGraphError::InvalidPath {
                path: path.to_string(),
            });
        }
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            Ok(candidate.to_path_buf())
        } else {
            Ok(self.cwd.join(candidate))
        }
    }

    /// Cascading delete: a child whose last parent is removed is abandoned
    /// and deleted in turn. Idempotent — deleting an absent filename is a
    /// silent no-op.
    pub fn delete(&mut self, filename: &Path) {
        let Some(node) = self.nodes.remove(filename) else {
            return;
        };

        for child in &node.children {
            let mut orphaned = false;
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parents.remove(filename);
                orphaned = child_node.parents.is_empty();
            }
            if orphaned {
                self.delete(child);
            }
        }

        for parent in &node.parents {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.remove(filename);
            }
        }

        self.entry_files.remove(filename);
    }

    /// Merge (or, if `destructive`, replace wholesale) the in-memory graph
    /// with a previously persisted snapshot. Cache entries are trusted to be
    /// internally consistent; no invariant check runs here.
    pub fn load(&mut self, records: FxHashMap<String, SerializedNode>, destructive: bool) {
        if destructive {
            self.nodes.clear();
        }
        for (filename, record) in records {
            self.nodes.insert(PathBuf::from(filename), record.to_node());
        }
    }

    /// Write every current node to `cache` and persist it to disk.
    pub fn save(&self, cache: &mut dyn GraphCache) -> Result<()> {
        for node in self.nodes.values() {
            let serialized = node.to_serialized();
            cache.set_key(&serialized.filename, serialized);
        }
        cache
            .save(true)
            .map_err(|source| DepGraphError::CacheIOFailure {
                path: PathBuf::from("<module-map-cache>"),
                source,
            })
    }

    /// Ordered mapping suitable for equality comparison and cache I/O.
    pub fn to_serialized(&self) -> BTreeMap<String, SerializedNode> {
        self.nodes
            .values()
            .map(|node| {
                let serialized = node.to_serialized();
                (serialized.filename.clone(), serialized)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(graph: &mut Graph, parent: &str, child: &str) {
        let parent_path = PathBuf::from(parent);
        let child_path = PathBuf::from(child);
        graph.get_or_create(&parent_path).children.insert(child_path.clone());
        graph.get_or_create(&child_path).parents.insert(parent_path);
    }

    #[test]
    fn bidirectional_invariant_holds_after_edge_insert() {
        let mut graph = Graph::new("/p");
        edge(&mut graph, "/p/a.ts", "/p/b.ts");
        assert!(graph.get(Path::new("/p/a.ts")).unwrap().children.contains(Path::new("/p/b.ts")));
        assert!(graph.get(Path::new("/p/b.ts")).unwrap().parents.contains(Path::new("/p/a.ts")));
    }

    #[test]
    fn delete_removes_back_edges() {
        let mut graph = Graph::new("/p");
        edge(&mut graph, "/p/a.ts", "/p/b.ts");
        graph.delete(Path::new("/p/a.ts"));
        assert!(graph.get(Path::new("/p/a.ts")).is_none());
        // b.ts has no remaining parents, so it is cascade-deleted too.
        assert!(graph.get(Path::new("/p/b.ts")).is_none());
    }

    #[test]
    fn delete_keeps_child_with_remaining_parent() {
        let mut graph = Graph::new("/p");
        edge(&mut graph, "/p/a.ts", "/p/shared.ts");
        edge(&mut graph, "/p/b.ts", "/p/shared.ts");
        graph.delete(Path::new("/p/a.ts"));
        let shared = graph.get(Path::new("/p/shared.ts")).unwrap();
        assert!(!shared.parents.contains(Path::new("/p/a.ts")));
        assert!(shared.parents.contains(Path::new("/p/b.ts")));
    }

    #[test]
    fn delete_unknown_filename_is_noop() {
        let mut graph = Graph::new("/p");
        graph.delete(Path::new("/p/missing.ts"));
        assert!(graph.is_empty());
    }

    #[test]
    fn ensure_entry_file_reports_whether_node_is_new() {
        let mut graph = Graph::new("/p");
        assert!(graph.ensure_entry_file(PathBuf::from("/p/a.ts")));
        assert!(!graph.ensure_entry_file(PathBuf::from("/p/a.ts")));
        assert!(graph.entry_files.contains(Path::new("/p/a.ts")));
    }

    #[test]
    fn destructive_load_drops_unsaved_nodes() {
        let mut graph = Graph::new("/p");
        graph.get_or_create(Path::new("/x/y.ts"));
        assert!(graph.contains(Path::new("/x/y.ts")));

        graph.load(FxHashMap::default(), true);
        assert!(!graph.contains(Path::new("/x/y.ts")));
    }

    #[test]
    fn non_destructive_load_merges() {
        let mut graph = Graph::new("/p");
        graph.get_or_create(Path::new("/x/y.ts"));

        let mut records = FxHashMap::default();
        records.insert(
            "/p/a.ts".to_string(),
            SerializedNode {
                filename: "/p/a.ts".to_string(),
                entry_files: vec![],
                children: vec![],
                parents: vec![],
            },
        );
        graph.load(records, false);

        assert!(graph.contains(Path::new("/x/y.ts")));
        assert!(graph.contains(Path::new("/p/a.ts")));
    }

    #[test]
    fn set_ignored_compiles_glob_patterns() {
        let mut graph = Graph::new("/p");
        graph.set_ignored(vec!["**/*.generated.ts".to_string()]);
        assert!(graph.is_ignored(Path::new("/p/a.generated.ts")));
        assert!(!graph.is_ignored(Path::new("/p/a.ts")));
    }

    #[test]
    fn malformed_ignore_pattern_is_dropped_not_fatal() {
        let mut graph = Graph::new("/p");
        graph.set_ignored(vec!["[".to_string(), "*.ts".to_string()]);
        assert!(graph.is_ignored(Path::new("/p/a.ts")));
    }

    #[test]
    fn resolve_absolute_joins_relative_against_cwd() {
        let graph = Graph::new("/p");
        assert_eq!(
            graph.resolve_absolute("src/a.ts").unwrap(),
            PathBuf::from("/p/src/a.ts")
        );
        assert_eq!(
            graph.resolve_absolute("/abs/a.ts").unwrap(),
            PathBuf::from("/abs/a.ts")
        );
        assert!(graph.resolve_absolute("").is_err());
    }
}

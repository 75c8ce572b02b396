//! A single known file and its direct/transitive-entry relationships.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One node per distinct absolute file path known to the graph.
///
/// Identity is the filename alone: two nodes are equal iff their filenames
/// are equal.
#[derive(Debug, Clone)]
pub struct Node {
    pub filename: PathBuf,
    /// Direct forward edges: files this one imports.
    pub children: FxHashSet<PathBuf>,
    /// Direct reverse edges: files that import this one.
    pub parents: FxHashSet<PathBuf>,
    /// Entry files from which this node is reachable via child edges.
    /// Never contains `filename` itself, even if this node is an entry file —
    /// entry-file identity lives in `Graph::entry_files`.
    pub entry_files: FxHashSet<PathBuf>,
}

impl Node {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            children: FxHashSet::default(),
            parents: FxHashSet::default(),
            entry_files: FxHashSet::default(),
        }
    }

    /// Construct with initial relationship sets, accepting any iterable of paths.
    pub fn with_relations(
        filename: impl Into<PathBuf>,
        children: impl IntoIterator<Item = PathBuf>,
        parents: impl IntoIterator<Item = PathBuf>,
        entry_files: impl IntoIterator<Item = PathBuf>,
    ) -> Self {
        Self {
            filename: filename.into(),
            children: children.into_iter().collect(),
            parents: parents.into_iter().collect(),
            entry_files: entry_files.into_iter().collect(),
        }
    }

    /// Canonical serialization: `{filename, entryFiles, children, parents}`,
    /// each set sorted lexicographically so the form is stable across runs.
    pub fn to_serialized(&self) -> SerializedNode {
        SerializedNode {
            filename: path_to_string(&self.filename),
            entry_files: sorted_strings(&self.entry_files),
            children: sorted_strings(&self.children),
            parents: sorted_strings(&self.parents),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.filename == other.filename
    }
}

impl Eq for Node {}

fn path_to_string(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

fn sorted_strings(paths: &FxHashSet<PathBuf>) -> Vec<String> {
    let mut out: Vec<String> = paths.iter().map(|p| path_to_string(p)).collect();
    out.sort();
    out
}

/// The canonical, cache-ready form of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode {
    pub filename: String,
    #[serde(default, rename = "entryFiles")]
    pub entry_files: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl SerializedNode {
    pub fn to_node(&self) -> Node {
        Node::with_relations(
            PathBuf::from(&self.filename),
            self.children.iter().map(PathBuf::from),
            self.parents.iter().map(PathBuf::from),
            self.entry_files.iter().map(PathBuf::from),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_filename_only() {
        let mut a = Node::new("/p/a.ts");
        a.children.insert(PathBuf::from("/p/b.ts"));
        let b = Node::new("/p/a.ts");
        assert_eq!(a, b);
    }

    #[test]
    fn serialized_sets_are_sorted() {
        let mut node = Node::new("/p/a.ts");
        node.children.insert(PathBuf::from("/p/z.ts"));
        node.children.insert(PathBuf::from("/p/b.ts"));
        let serialized = node.to_serialized();
        assert_eq!(serialized.children, vec!["/p/b.ts", "/p/z.ts"]);
    }

    #[test]
    fn roundtrip_through_serialized_form() {
        let mut node = Node::new("/p/a.ts");
        node.children.insert(PathBuf::from("/p/b.ts"));
        node.parents.insert(PathBuf::from("/p/root.ts"));
        node.entry_files.insert(PathBuf::from("/p/root.ts"));

        let serialized = node.to_serialized();
        let restored = serialized.to_node();
        assert_eq!(restored, node);
        assert_eq!(restored.children, node.children);
        assert_eq!(restored.parents, node.parents);
        assert_eq!(restored.entry_files, node.entry_files);
    }
}

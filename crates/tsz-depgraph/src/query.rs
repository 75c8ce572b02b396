//! The affected-entry-files reverse-reachability query.

use crate::graph::Graph;
use rustc_hash::FxHashSet;
use std::path::PathBuf;

/// Result of an `affectedEntryFiles` query: every affected file, and the
/// subset of those that are entry files — the latter is the primary answer
/// a test-runner driver consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedFiles {
    pub all: FxHashSet<PathBuf>,
    pub entry_files: FxHashSet<PathBuf>,
}

/// Compute `affected(S)` for every seed `S` and union the results. Assumes
/// `seeds` have already been resolved to absolute paths, filtered to those
/// present in `graph`, and that the populator has already refreshed their
/// edges — this function only walks the already-built graph.
pub fn affected_entry_files(graph: &Graph, seeds: &[PathBuf]) -> AffectedFiles {
    let mut all = FxHashSet::default();

    for seed in seeds {
        let Some(node) = graph.get(seed) else {
            continue;
        };

        all.extend(node.entry_files.iter().cloned());
        if graph.entry_files.contains(seed) {
            all.insert(seed.clone());
        }

        // Iterative DFS over parents, visited set scoped to this seed's frame.
        let mut stack: Vec<PathBuf> = node.parents.iter().cloned().collect();
        let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            all.insert(current.clone());
            if let Some(current_node) = graph.get(&current) {
                for parent in &current_node.parents {
                    if !visited.contains(parent) {
                        stack.push(parent.clone());
                    }
                }
            }
        }
    }

    let entry_files = all.intersection(&graph.entry_files).cloned().collect();
    AffectedFiles { all, entry_files }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn edge(graph: &mut Graph, parent: &str, child: &str) {
        let parent_path = PathBuf::from(parent);
        let child_path = PathBuf::from(child);
        graph.get_or_create(&parent_path).children.insert(child_path.clone());
        graph.get_or_create(&child_path).parents.insert(parent_path);
    }

    #[test]
    fn affected_from_dependency_reaches_entry() {
        let mut graph = Graph::new("/p");
        graph.entry_files.insert(PathBuf::from("/p/a.ts"));
        edge(&mut graph, "/p/a.ts", "/p/b.ts");
        graph.get_or_create(Path::new("/p/b.ts")).entry_files.insert(PathBuf::from("/p/a.ts"));

        let result = affected_entry_files(&graph, &[PathBuf::from("/p/b.ts")]);
        assert_eq!(result.entry_files, FxHashSet::from_iter([PathBuf::from("/p/a.ts")]));
    }

    #[test]
    fn affected_from_entry_itself() {
        let mut graph = Graph::new("/p");
        graph.entry_files.insert(PathBuf::from("/p/a.ts"));
        graph.get_or_create(Path::new("/p/a.ts"));

        let result = affected_entry_files(&graph, &[PathBuf::from("/p/a.ts")]);
        assert_eq!(result.entry_files, FxHashSet::from_iter([PathBuf::from("/p/a.ts")]));
    }

    #[test]
    fn unknown_file_yields_empty() {
        let graph = Graph::new("/p");
        let result = affected_entry_files(&graph, &[PathBuf::from("/p/c.ts")]);
        assert!(result.entry_files.is_empty());
        assert!(result.all.is_empty());
    }

    #[test]
    fn diamond_both_entries_affected() {
        let mut graph = Graph::new("/p");
        graph.entry_files.insert(PathBuf::from("/p/e1.ts"));
        graph.entry_files.insert(PathBuf::from("/p/e2.ts"));
        edge(&mut graph, "/p/e1.ts", "/p/shared.ts");
        edge(&mut graph, "/p/e2.ts", "/p/shared.ts");
        graph
            .get_or_create(Path::new("/p/shared.ts"))
            .entry_files
            .extend([PathBuf::from("/p/e1.ts"), PathBuf::from("/p/e2.ts")]);

        let result = affected_entry_files(&graph, &[PathBuf::from("/p/shared.ts")]);
        assert_eq!(
            result.entry_files,
            FxHashSet::from_iter([PathBuf::from("/p/e1.ts"), PathBuf::from("/p/e2.ts")])
        );
    }

    #[test]
    fn cyclic_ancestor_walk_terminates() {
        let mut graph = Graph::new("/p");
        edge(&mut graph, "/p/a.ts", "/p/b.ts");
        edge(&mut graph, "/p/b.ts", "/p/c.ts");
        edge(&mut graph, "/p/c.ts", "/p/a.ts");

        let result = affected_entry_files(&graph, &[PathBuf::from("/p/a.ts")]);
        // a's ancestors via parents: c -> b -> a (cycle completes back to a itself).
        assert_eq!(result.all.len(), 3);
    }
}

//! Black-box coverage of the reverse-reachability query against a graph
//! built the way a real caller builds one: through `DependencyGraph`, not
//! by hand-assembling `Graph` nodes.

use std::path::PathBuf;
use tempfile::TempDir;
use tsz_depgraph::query::affected_entry_files;
use tsz_depgraph::{DependencyGraph, GraphOptions};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn transitive_dependency_reaches_distant_entry() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.ts", "import { b } from './b';");
    write(&dir, "b.ts", "import { c } from './c';");
    let c = write(&dir, "c.ts", "export const c = 1;");

    let cache_dir = dir.path().join(".cache");
    let options = GraphOptions::new(&cache_dir)
        .with_cwd(dir.path())
        .with_entry_files([a.clone()]);
    let depgraph = DependencyGraph::open(options).unwrap();

    let result = affected_entry_files(depgraph.graph(), &[c]);
    assert!(result.entry_files.contains(&a));
}

#[test]
fn unrelated_entry_is_not_affected() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.ts", "import { b } from './b';");
    write(&dir, "b.ts", "export const b = 1;");
    let unrelated = write(&dir, "unrelated.ts", "export const u = 1;");

    let cache_dir = dir.path().join(".cache");
    let options = GraphOptions::new(&cache_dir)
        .with_cwd(dir.path())
        .with_entry_files([a, unrelated.clone()]);
    let depgraph = DependencyGraph::open(options).unwrap();

    let b = dir.path().join("b.ts");
    let result = affected_entry_files(depgraph.graph(), &[b]);
    assert!(!result.entry_files.contains(&unrelated));
}

#[test]
fn multiple_seeds_union_their_affected_sets() {
    let dir = TempDir::new().unwrap();
    let e1 = write(&dir, "e1.ts", "import { x } from './x';");
    let e2 = write(&dir, "e2.ts", "import { y } from './y';");
    let x = write(&dir, "x.ts", "export const x = 1;");
    let y = write(&dir, "y.ts", "export const y = 1;");

    let cache_dir = dir.path().join(".cache");
    let options = GraphOptions::new(&cache_dir)
        .with_cwd(dir.path())
        .with_entry_files([e1.clone(), e2.clone()]);
    let depgraph = DependencyGraph::open(options).unwrap();

    let result = affected_entry_files(depgraph.graph(), &[x, y]);
    assert!(result.entry_files.contains(&e1));
    assert!(result.entry_files.contains(&e2));
}

#[test]
fn an_entry_file_with_no_dependents_is_its_own_sole_affected_entry() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.ts", "export const a = 1;");

    let cache_dir = dir.path().join(".cache");
    let options = GraphOptions::new(&cache_dir)
        .with_cwd(dir.path())
        .with_entry_files([a.clone()]);
    let depgraph = DependencyGraph::open(options).unwrap();

    let result = affected_entry_files(depgraph.graph(), &[a.clone()]);
    assert_eq!(result.entry_files.len(), 1);
    assert!(result.entry_files.contains(&a));
}

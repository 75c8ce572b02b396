//! Persistent, incremental module dependency graph for a test runner's
//! watch mode.
//!
//! Given a set of entry test files and a set of source files that changed
//! on disk since the last invocation, answers: which entry files must be
//! re-executed? The graph and its change-detection cache persist across
//! process invocations in a caller-chosen cache directory.
//!
//! The dependency extractor and the filesystem change detector are
//! pluggable collaborators (see [`DependencyExtractor`] and [`ChangeCache`]);
//! this crate ships default implementations good enough to use directly or
//! to test the core against, but a caller may swap in a language-specific
//! extractor without touching [`Graph`] or [`Populator`].

pub mod change_cache;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod graph_cache;
pub mod node;
pub mod options;
pub mod populator;
pub mod query;

pub use change_cache::{ChangeCache, FileChangeCache};
pub use error::{DepGraphError, Result};
pub use extractor::RegexDependencyExtractor;
pub use graph::Graph;
pub use graph_cache::{GraphCache, JsonGraphCache};
pub use node::{Node, SerializedNode};
pub use options::GraphOptions;
pub use populator::DependencyExtractor;
pub use query::AffectedFiles;

use populator::Populator;
use std::path::PathBuf;

/// `uninitialized -> initializing -> ready`. Re-entry into `initialize` is
/// an `AlreadyInitialized` error, expressed here as a one-way discriminator
/// rather than a runtime flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Ready,
}

/// The public facade: owns the graph plus both persistence adapters and
/// drives the one-shot initialization sequence.
pub struct DependencyGraph {
    graph: Graph,
    graph_cache: Box<dyn GraphCache>,
    change_cache: Box<dyn ChangeCache>,
    extractor: Box<dyn DependencyExtractor>,
    state: State,
}

impl DependencyGraph {
    /// Construct with the default on-disk adapters and the bundled
    /// [`RegexDependencyExtractor`], then run `initialize` immediately —
    /// `initialize` is a one-shot step owned by the constructor, never
    /// called again afterward.
    pub fn open(options: GraphOptions) -> Result<Self> {
        Self::open_with(
            options,
            Box::new(RegexDependencyExtractor::new()),
        )
    }

    /// Construct with a caller-supplied extractor (the pluggable
    /// collaborator), still running `initialize` immediately.
    pub fn open_with(
        options: GraphOptions,
        extractor: Box<dyn DependencyExtractor>,
    ) -> Result<Self> {
        let module_map_path = options.module_map_cache_path();
        let file_entry_path = options.file_entry_cache_path();

        let mut graph_cache: Box<dyn GraphCache> = Box::new(
            JsonGraphCache::open(&module_map_path).map_err(|source| {
                DepGraphError::CacheIOFailure {
                    path: module_map_path.clone(),
                    source,
                }
            })?,
        );
        let mut change_cache: Box<dyn ChangeCache> = Box::new(
            FileChangeCache::open(&file_entry_path).map_err(|source| {
                DepGraphError::CacheIOFailure {
                    path: file_entry_path.clone(),
                    source,
                }
            })?,
        );

        if options.reset {
            graph_cache
                .destroy()
                .map_err(|source| DepGraphError::CacheIOFailure {
                    path: module_map_path.clone(),
                    source,
                })?;
            change_cache
                .destroy()
                .map_err(|source| DepGraphError::CacheIOFailure {
                    path: file_entry_path.clone(),
                    source,
                })?;
        }

        let mut graph = Graph::new(options.cwd.clone());
        graph.set_ignored(options.ignored.clone());

        let mut depgraph = Self {
            graph,
            graph_cache,
            change_cache,
            extractor,
            state: State::Uninitialized,
        };
        depgraph.initialize(options.entry_files.into_iter().collect())?;
        Ok(depgraph)
    }

    /// The fixed initialization sequence: load (destructive) -> ensure entry
    /// nodes -> determine changed-among-known -> populate (force) -> save.
    fn initialize(&mut self, entry_files: Vec<PathBuf>) -> Result<()> {
        let _span = tracing::debug_span!("depgraph_initialize").entered();
        if self.state != State::Uninitialized {
            return Err(DepGraphError::AlreadyInitialized);
        }

        let records = {
            let _span = tracing::debug_span!("graph_cache_load").entered();
            self.graph_cache.all().map_err(|source| DepGraphError::CacheIOFailure {
                path: PathBuf::from("<module-map-cache>"),
                source,
            })?
        };
        tracing::debug!(known_files = records.len(), "loaded persisted module map");
        self.graph.load(records, true);

        let mut newly_added = Vec::new();
        for entry_file in entry_files {
            let absolute = self.graph.resolve_absolute(
                entry_file
                    .to_str()
                    .ok_or_else(|| DepGraphError::InvalidPath {
                        path: entry_file.to_string_lossy().into_owned(),
                    })?,
            )?;
            if self.graph.ensure_entry_file(absolute.clone()) {
                newly_added.push(absolute);
            }
        }

        let known_files = self.graph.files();
        let changed_known = self.change_cache.updated_among(&known_files);

        let mut start: Vec<PathBuf> = changed_known;
        for filename in newly_added {
            if !start.contains(&filename) {
                start.push(filename);
            }
        }

        tracing::debug!(start = start.len(), "populating from changed-plus-new-entry nodes");
        let populator = Populator::new(self.extractor.as_ref());
        populator.populate(&mut self.graph, self.change_cache.as_ref(), &start, true)?;

        {
            let _span = tracing::debug_span!("change_cache_reconcile").entered();
            self.change_cache
                .reconcile(true)
                .map_err(|source| DepGraphError::CacheIOFailure {
                    path: PathBuf::from("<file-entry-cache>"),
                    source,
                })?;
        }
        {
            let _span = tracing::debug_span!("graph_cache_save").entered();
            self.graph.save(self.graph_cache.as_mut())?;
        }

        self.state = State::Ready;
        Ok(())
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Add an entry file after construction. If it is genuinely new, the
    /// populator is run on it immediately.
    pub fn add_entry_file(&mut self, filename: impl AsRef<std::path::Path>) -> Result<()> {
        let absolute = self.graph.resolve_absolute(
            filename
                .as_ref()
                .to_str()
                .ok_or_else(|| DepGraphError::InvalidPath {
                    path: filename.as_ref().to_string_lossy().into_owned(),
                })?,
        )?;
        if self.graph.ensure_entry_file(absolute.clone()) {
            let populator = Populator::new(self.extractor.as_ref());
            populator.populate(
                &mut self.graph,
                self.change_cache.as_ref(),
                &[absolute],
                true,
            )?;
        }
        Ok(())
    }

    /// Remove a file from the graph, cascading to any child left with no
    /// remaining parent, and forget its change-detection snapshot so a
    /// later reload does not skip re-examining it if the path reappears.
    pub fn remove_file(&mut self, filename: impl AsRef<std::path::Path>) -> Result<()> {
        let absolute = self.graph.resolve_absolute(
            filename
                .as_ref()
                .to_str()
                .ok_or_else(|| DepGraphError::InvalidPath {
                    path: filename.as_ref().to_string_lossy().into_owned(),
                })?,
        )?;
        self.graph.delete(&absolute);
        self.change_cache.remove_entry(&absolute);
        Ok(())
    }

    /// The `affectedEntryFiles` query.
    ///
    /// `changed`: a possibly-empty set of recently-changed paths; if empty,
    /// it is derived from the change cache against every known file.
    /// `mark_changed`: paths to forcibly invalidate in the change cache
    /// before resolving `changed`.
    pub fn affected_entry_files(
        &mut self,
        changed: &[PathBuf],
        mark_changed: &[PathBuf],
    ) -> Result<AffectedFiles> {
        let _span = tracing::debug_span!("affected_entry_files").entered();
        for path in mark_changed {
            self.change_cache.remove_entry(path);
        }

        let change_set: Vec<PathBuf> = if changed.is_empty() {
            self.change_cache.updated_among(&self.graph.files())
        } else {
            changed.to_vec()
        };

        if change_set.is_empty() {
            return Ok(AffectedFiles::default());
        }

        let seeds: Vec<PathBuf> = change_set
            .iter()
            .filter_map(|path| {
                let absolute = path
                    .to_str()
                    .and_then(|s| self.graph.resolve_absolute(s).ok())?;
                self.graph.contains(&absolute).then_some(absolute)
            })
            .collect();

        if seeds.is_empty() {
            return Ok(AffectedFiles::default());
        }

        let populator = Populator::new(self.extractor.as_ref());
        populator.populate(&mut self.graph, self.change_cache.as_ref(), &seeds, false)?;

        Ok(query::affected_entry_files(&self.graph, &seeds))
    }

    /// Persist both caches to disk.
    pub fn save(&mut self) -> Result<()> {
        self.graph.save(self.graph_cache.as_mut())?;
        self.change_cache
            .reconcile(true)
            .map_err(|source| DepGraphError::CacheIOFailure {
                path: PathBuf::from("<file-entry-cache>"),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn cold_start_one_entry_with_one_dep() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        let b = write(&dir, "b.ts", "export const b = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a.clone()]);
        let depgraph = DependencyGraph::open(options).unwrap();

        assert_eq!(depgraph.graph().len(), 2);
        let a_node = depgraph.graph().get(&a).unwrap();
        assert!(a_node.children.contains(&b));
        assert!(a_node.parents.is_empty());
        assert!(a_node.entry_files.is_empty());

        let b_node = depgraph.graph().get(&b).unwrap();
        assert!(b_node.children.is_empty());
        assert!(b_node.parents.contains(&a));
        assert!(b_node.entry_files.contains(&a));
    }

    #[test]
    fn affected_from_dependency_change() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        let b = write(&dir, "b.ts", "export const b = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a.clone()]);
        let mut depgraph = DependencyGraph::open(options).unwrap();

        let result = depgraph.affected_entry_files(&[b], &[]).unwrap();
        assert_eq!(result.entry_files, rustc_hash::FxHashSet::from_iter([a]));
    }

    #[test]
    fn affected_from_entry_change() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        write(&dir, "b.ts", "export const b = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a.clone()]);
        let mut depgraph = DependencyGraph::open(options).unwrap();

        let result = depgraph.affected_entry_files(&[a.clone()], &[]).unwrap();
        assert_eq!(result.entry_files, rustc_hash::FxHashSet::from_iter([a]));
    }

    #[test]
    fn unknown_file_yields_no_affected_entries() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        write(&dir, "b.ts", "export const b = 1;");
        let c = dir.path().join("c.ts");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a]);
        let mut depgraph = DependencyGraph::open(options).unwrap();

        let result = depgraph.affected_entry_files(&[c], &[]).unwrap();
        assert!(result.entry_files.is_empty());
    }

    #[test]
    fn empty_change_set_on_unchanged_filesystem_yields_empty() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        write(&dir, "b.ts", "export const b = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a]);
        let mut depgraph = DependencyGraph::open(options).unwrap();

        let result = depgraph.affected_entry_files(&[], &[]).unwrap();
        assert!(result.entry_files.is_empty());
        assert!(result.all.is_empty());
    }

    #[test]
    fn diamond_dependency_both_entries_affected() {
        let dir = TempDir::new().unwrap();
        let e1 = write(&dir, "e1.ts", "import s from './shared';");
        let e2 = write(&dir, "e2.ts", "import s from './shared';");
        let shared = write(&dir, "shared.ts", "export default 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([e1.clone(), e2.clone()]);
        let depgraph = DependencyGraph::open(options).unwrap();

        let shared_node = depgraph.graph().get(&shared).unwrap();
        assert_eq!(
            shared_node.entry_files,
            rustc_hash::FxHashSet::from_iter([e1.clone(), e2.clone()])
        );
    }

    #[test]
    fn remove_file_cascades_to_an_orphaned_child() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        let b = write(&dir, "b.ts", "export const b = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a.clone()]);
        let mut depgraph = DependencyGraph::open(options).unwrap();
        assert_eq!(depgraph.graph().len(), 2);

        depgraph.remove_file(&a).unwrap();

        assert!(depgraph.graph().get(&a).is_none());
        // b.ts had only a.ts as a parent, so it is cascade-deleted too.
        assert!(depgraph.graph().get(&b).is_none());
    }

    #[test]
    fn reinitializing_is_rejected() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "export const a = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a]);
        let mut depgraph = DependencyGraph::open(options).unwrap();

        let err = depgraph.initialize(vec![]).unwrap_err();
        assert!(matches!(err, DepGraphError::AlreadyInitialized));
    }

    #[test]
    fn round_trip_through_serialized_form() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { b } from './b';");
        write(&dir, "b.ts", "export const b = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a]);
        let depgraph = DependencyGraph::open(options).unwrap();

        let serialized = depgraph.graph().to_serialized();

        let mut fresh = Graph::new(dir.path());
        let records = serialized
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        fresh.load(records, true);

        assert_eq!(fresh.to_serialized(), serialized);
    }

    #[test]
    fn destructive_reload_drops_stale_node_but_non_destructive_keeps_it() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "export const a = 1;");

        let cache_dir = dir.path().join(".cache");
        let options = GraphOptions::new(&cache_dir)
            .with_cwd(dir.path())
            .with_entry_files([a]);
        let depgraph = DependencyGraph::open(options).unwrap();

        let records = depgraph.graph_cache.all().unwrap();

        let mut graph = Graph::new(dir.path());
        graph.get_or_create(std::path::Path::new("/x/y.ts"));
        assert!(graph.contains(std::path::Path::new("/x/y.ts")));

        graph.load(records.clone(), true);
        assert!(!graph.contains(std::path::Path::new("/x/y.ts")));

        let mut graph_non_destructive = Graph::new(dir.path());
        graph_non_destructive.get_or_create(std::path::Path::new("/x/y.ts"));
        graph_non_destructive.load(records, false);
        assert!(graph_non_destructive.contains(std::path::Path::new("/x/y.ts")));
    }
}

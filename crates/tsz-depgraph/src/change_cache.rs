//! The `ChangeCache` adapter and its default filesystem-backed implementation.
//!
//! Grounded on `tsz-cli`'s incremental-build contract (`BuildInfo` /
//! `ChangeTracker` / `compute_file_version`, observed through
//! `incremental_tests.rs`): a per-file version string derived from content,
//! diffed against the last-reconciled snapshot.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Thin contract over an external file-change detector.
pub trait ChangeCache {
    /// Pure query against the last reconciled snapshot: the return value
    /// depends only on the last-committed baseline, never changes as a
    /// side effect of being asked. (An implementation may still use
    /// interior mutability to remember which paths it has been asked
    /// about, purely so `reconcile` knows what to snapshot next — see
    /// [`FileChangeCache`].)
    fn has_changed(&self, path: &Path) -> bool;
    /// Subset of `paths` that differ from the snapshot.
    fn updated_among(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .filter(|p| self.has_changed(p))
            .cloned()
            .collect()
    }
    /// Forget a path's snapshot, marking it changed for the next query.
    fn remove_entry(&mut self, path: &Path);
    /// Commit current on-disk state as the new baseline, for every path
    /// the cache has been asked about (via `has_changed`/`updated_among`)
    /// since the last reconcile, plus everything already in the baseline.
    fn reconcile(&mut self, persist: bool) -> anyhow::Result<()>;
    fn destroy(&mut self) -> anyhow::Result<()>;
}

/// A `(length, mtime_nanos, short content hash)` snapshot for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct FileSnapshot {
    len: u64,
    mtime_nanos: u128,
    hash: u64,
}

/// Default `ChangeCache`: a JSON snapshot of `(len, mtime, hash)` per
/// tracked path, persisted as `file-entry.cache.json` — opaque to the core,
/// owned entirely by this implementation.
pub struct FileChangeCache {
    path: PathBuf,
    baseline: FxHashMap<PathBuf, FileSnapshot>,
    /// Paths asked about since the last reconcile, so `reconcile` knows
    /// what to snapshot even though it takes no path argument itself.
    queried: RefCell<FxHashSet<PathBuf>>,
    dirty: bool,
}

impl FileChangeCache {
    /// Missing or corrupt snapshot file is a cold start: every path is
    /// reported changed until the first `reconcile`.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let baseline = match File::open(&path) {
            Ok(file) => {
                let reader = std::io::BufReader::new(file);
                serde_json::from_reader(reader).unwrap_or_default()
            }
            Err(_) => FxHashMap::default(),
        };
        Ok(Self {
            path,
            baseline,
            queried: RefCell::new(FxHashSet::default()),
            dirty: false,
        })
    }

    fn current_snapshot(path: &Path) -> Option<FileSnapshot> {
        let metadata = std::fs::metadata(path).ok()?;
        let mtime_nanos = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let content = std::fs::read(path).ok()?;
        Some(FileSnapshot {
            len: metadata.len(),
            mtime_nanos,
            hash: hash_bytes(&content),
        })
    }
}

impl ChangeCache for FileChangeCache {
    fn has_changed(&self, path: &Path) -> bool {
        self.queried.borrow_mut().insert(path.to_path_buf());

        let Some(current) = Self::current_snapshot(path) else {
            // A path that can no longer be read is treated as changed.
            return true;
        };
        match self.baseline.get(path) {
            Some(previous) => previous != &current,
            None => true,
        }
    }

    fn remove_entry(&mut self, path: &Path) {
        self.baseline.remove(path);
        self.queried.get_mut().remove(path);
        self.dirty = true;
    }

    fn reconcile(&mut self, persist: bool) -> anyhow::Result<()> {
        let paths: Vec<PathBuf> = self
            .baseline
            .keys()
            .cloned()
            .chain(self.queried.get_mut().drain())
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();
        for path in paths {
            match Self::current_snapshot(&path) {
                Some(snapshot) => {
                    self.baseline.insert(path, snapshot);
                }
                None => {
                    self.baseline.remove(&path);
                }
            }
        }
        self.dirty = true;
        if persist {
            self.persist()?;
        }
        Ok(())
    }

    fn destroy(&mut self) -> anyhow::Result<()> {
        self.baseline.clear();
        self.queried.get_mut().clear();
        self.dirty = false;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl FileChangeCache {
    /// Record a path into the baseline at its current on-disk state,
    /// called by the core whenever it decides a path is now known.
    pub fn track(&mut self, path: &Path) {
        if let Some(snapshot) = Self::current_snapshot(path) {
            self.baseline.insert(path.to_path_buf(), snapshot);
            self.dirty = true;
        }
    }

    pub fn persist(&mut self) -> anyhow::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer(writer, &self.baseline)?;
        self.dirty = false;
        Ok(())
    }
}

/// Non-cryptographic content hash; this cache only needs to distinguish
/// "same bytes" from "different bytes", not resist tampering.
fn hash_bytes(bytes: &[u8]) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unknown_path_is_changed() {
        let dir = TempDir::new().unwrap();
        let cache = FileChangeCache::open(dir.path().join("file-entry.cache.json")).unwrap();
        let file = dir.path().join("a.ts");
        std::fs::write(&file, "content").unwrap();
        assert!(cache.has_changed(&file));
    }

    #[test]
    fn reconcile_then_unchanged_file_reports_unchanged() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.ts");
        std::fs::write(&file, "content").unwrap();

        let mut cache = FileChangeCache::open(dir.path().join("file-entry.cache.json")).unwrap();
        cache.track(&file);
        cache.reconcile(false).unwrap();

        assert!(!cache.has_changed(&file));
    }

    #[test]
    fn modifying_content_is_detected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.ts");
        std::fs::write(&file, "content").unwrap();

        let mut cache = FileChangeCache::open(dir.path().join("file-entry.cache.json")).unwrap();
        cache.track(&file);
        cache.reconcile(false).unwrap();
        assert!(!cache.has_changed(&file));

        std::fs::write(&file, "different content").unwrap();
        assert!(cache.has_changed(&file));
    }

    #[test]
    fn remove_entry_forces_changed() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.ts");
        std::fs::write(&file, "content").unwrap();

        let mut cache = FileChangeCache::open(dir.path().join("file-entry.cache.json")).unwrap();
        cache.track(&file);
        cache.reconcile(false).unwrap();
        assert!(!cache.has_changed(&file));

        cache.remove_entry(&file);
        assert!(cache.has_changed(&file));
    }

    #[test]
    fn persist_then_reopen_roundtrips() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.ts");
        std::fs::write(&file, "content").unwrap();
        let cache_path = dir.path().join("file-entry.cache.json");

        let mut cache = FileChangeCache::open(&cache_path).unwrap();
        cache.track(&file);
        cache.reconcile(true).unwrap();

        let reopened = FileChangeCache::open(&cache_path).unwrap();
        assert!(!reopened.has_changed(&file));
    }
}

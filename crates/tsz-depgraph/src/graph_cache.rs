//! The `GraphCache` adapter and its default JSON-file implementation.
//!
//! Grounded on the `conformance` crate's `cache.rs`: streaming
//! `serde_json::from_reader` to avoid loading the cache file twice, and a
//! thin wrapper type around a `filename -> record` map.

use crate::node::SerializedNode;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Thin contract over an external key/value cache.
///
/// The core treats records as opaque structured data except for the four
/// fields `SerializedNode` names; it never interprets the cache format
/// beyond that.
pub trait GraphCache {
    fn all(&self) -> anyhow::Result<FxHashMap<String, SerializedNode>>;
    fn set_key(&mut self, filename: &str, record: SerializedNode);
    /// Persist accumulated writes to disk. `persist_all` mirrors the
    /// underlying collaborator's "flush everything, not just the delta"
    /// knob used by `Graph::save`.
    fn save(&mut self, persist_all: bool) -> anyhow::Result<()>;
    fn destroy(&mut self) -> anyhow::Result<()>;
}

/// Default `GraphCache`: a single JSON object file, keyed by absolute
/// filename, persisted as `module-map.cache.json`.
pub struct JsonGraphCache {
    path: PathBuf,
    entries: FxHashMap<String, SerializedNode>,
    dirty: bool,
}

impl JsonGraphCache {
    /// Load the cache file if present; a missing or unreadable file is a
    /// cold start, not an error.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match File::open(&path) {
            Ok(file) => {
                let reader = std::io::BufReader::new(file);
                serde_json::from_reader(reader).unwrap_or_default()
            }
            Err(_) => FxHashMap::default(),
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphCache for JsonGraphCache {
    fn all(&self) -> anyhow::Result<FxHashMap<String, SerializedNode>> {
        Ok(self.entries.clone())
    }

    fn set_key(&mut self, filename: &str, record: SerializedNode) {
        self.entries.insert(filename.to_string(), record);
        self.dirty = true;
    }

    fn save(&mut self, persist_all: bool) -> anyhow::Result<()> {
        if !self.dirty && !persist_all {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, &self.entries)?;
        self.dirty = false;
        Ok(())
    }

    fn destroy(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.dirty = false;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_cold_start() {
        let dir = TempDir::new().unwrap();
        let cache = JsonGraphCache::open(dir.path().join("module-map.cache.json")).unwrap();
        assert!(cache.all().unwrap().is_empty());
    }

    #[test]
    fn save_then_reopen_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module-map.cache.json");
        let mut cache = JsonGraphCache::open(&path).unwrap();
        cache.set_key(
            "/p/a.ts",
            SerializedNode {
                filename: "/p/a.ts".to_string(),
                entry_files: vec![],
                children: vec!["/p/b.ts".to_string()],
                parents: vec![],
            },
        );
        cache.save(false).unwrap();

        let reopened = JsonGraphCache::open(&path).unwrap();
        let all = reopened.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["/p/a.ts"].children, vec!["/p/b.ts"]);
    }

    #[test]
    fn destroy_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module-map.cache.json");
        let mut cache = JsonGraphCache::open(&path).unwrap();
        cache.set_key(
            "/p/a.ts",
            SerializedNode {
                filename: "/p/a.ts".to_string(),
                entry_files: vec![],
                children: vec![],
                parents: vec![],
            },
        );
        cache.save(true).unwrap();
        assert!(path.exists());
        cache.destroy().unwrap();
        assert!(!path.exists());
    }
}

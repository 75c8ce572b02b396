//! Construction options.

use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::PathBuf;

/// Options resolved once at construction, mirroring the shape `tsz-cli`
/// resolves a raw `TsConfig` into a `ResolvedCompilerOptions`: a plain bag
/// of caller-supplied values, validated and defaulted in one place.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    pub module_map_cache_filename: String,
    pub file_entry_cache_filename: String,
    pub cache_dir: PathBuf,
    pub reset: bool,
    pub entry_files: FxHashSet<PathBuf>,
    pub ignored: Vec<String>,
    pub cwd: PathBuf,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new(PathBuf::from(".cache"))
    }
}

impl GraphOptions {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_map_cache_filename: "module-map.cache.json".to_string(),
            file_entry_cache_filename: "file-entry.cache.json".to_string(),
            cache_dir: cache_dir.into(),
            reset: false,
            entry_files: FxHashSet::default(),
            ignored: Vec::new(),
            cwd: std::env::current_dir().unwrap_or_default(),
        }
    }

    pub fn with_entry_files(mut self, entry_files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.entry_files = entry_files.into_iter().collect();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_ignored(mut self, ignored: impl IntoIterator<Item = String>) -> Self {
        self.ignored = ignored.into_iter().collect();
        self
    }

    pub fn module_map_cache_path(&self) -> PathBuf {
        self.cache_dir.join(&self.module_map_cache_filename)
    }

    pub fn file_entry_cache_path(&self) -> PathBuf {
        self.cache_dir.join(&self.file_entry_cache_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_paths_join_dir_and_filename() {
        let options = GraphOptions::new("/tmp/cache");
        assert_eq!(
            options.module_map_cache_path(),
            PathBuf::from("/tmp/cache/module-map.cache.json")
        );
        assert_eq!(
            options.file_entry_cache_path(),
            PathBuf::from("/tmp/cache/file-entry.cache.json")
        );
    }

    #[test]
    fn default_matches_new_with_a_dot_cache_dir() {
        let defaulted = GraphOptions::default();
        assert_eq!(defaulted.cache_dir, PathBuf::from(".cache"));
        assert!(!defaulted.reset);
        assert!(defaulted.entry_files.is_empty());
    }

    #[test]
    fn deserializes_from_a_partial_json_object() {
        let options: GraphOptions =
            serde_json::from_str(r#"{"cacheDir":"/tmp/custom-cache","reset":true}"#).unwrap();
        assert_eq!(options.cache_dir, PathBuf::from("/tmp/custom-cache"));
        assert!(options.reset);
        // Fields absent from the JSON object fall back to `Default::default()`.
        assert_eq!(
            options.module_map_cache_filename,
            "module-map.cache.json"
        );
    }
}

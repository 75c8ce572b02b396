//! A regex-based default [`DependencyExtractor`] good enough to exercise and
//! test the core end-to-end.
//!
//! This is a convenience default, not a replacement for a real parser-backed
//! extractor — a production caller in this workspace would plug in one
//! backed by `tsz-parser`/`tsz-binder` module resolution instead (see
//! `tsz-cli::driver_resolution::collect_module_specifiers`, which this
//! module takes its resolution-candidate shape from).

use crate::populator::DependencyExtractor;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// File extensions tried, in order, when a relative specifier has none
/// (mirrors `tsz-cli`'s `expand_module_path_candidates` extension list).
const CANDIDATE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Three independent patterns rather than one alternation with an optional
/// `import {...} from` prefix: that prefix's character class would include
/// the letters of `from` itself, making a single greedy pattern ambiguous
/// about where the prefix ends. Matching `from '...'`, `require('...')`,
/// and bare `import '...'` separately keeps each pattern unambiguous.
fn from_clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\bfrom\s*["']([^"']+)["']"#).expect("static regex must compile")
    })
}

fn require_call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\brequire\s*\(\s*["']([^"']+)["']\s*\)"#).expect("static regex must compile")
    })
}

fn bare_import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\bimport\s*["']([^"']+)["']"#).expect("static regex must compile")
    })
}

/// Scans raw source text for `import`/`export ... from`/`require(...)`
/// specifiers and resolves relative ones against the importing file's
/// directory, trying a fixed extension and index-file candidate list.
pub struct RegexDependencyExtractor;

impl RegexDependencyExtractor {
    pub fn new() -> Self {
        Self
    }

    fn resolve_relative(from_dir: &Path, specifier: &str) -> Option<PathBuf> {
        let joined = from_dir.join(specifier);
        if joined.exists() && joined.is_file() {
            return Some(normalize(&joined));
        }
        for ext in CANDIDATE_EXTENSIONS {
            let candidate = with_extension(&joined, ext);
            if candidate.exists() {
                return Some(normalize(&candidate));
            }
        }
        for ext in CANDIDATE_EXTENSIONS {
            let candidate = joined.join(format!("index.{ext}"));
            if candidate.exists() {
                return Some(normalize(&candidate));
            }
        }
        None
    }
}

impl Default for RegexDependencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyExtractor for RegexDependencyExtractor {
    fn extract(&self, filename: &Path, cwd: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let text = std::fs::read_to_string(filename)?;
        let from_dir = filename.parent().unwrap_or(cwd);

        let specifiers = from_clause_pattern()
            .captures_iter(&text)
            .chain(require_call_pattern().captures_iter(&text))
            .chain(bare_import_pattern().captures_iter(&text))
            .map(|capture| capture[1].to_string());

        let mut resolved = Vec::new();
        for specifier in specifiers {
            if !specifier.starts_with('.') {
                // Non-relative specifiers are package imports; resolving
                // those is out of scope for this crate.
                continue;
            }
            if let Some(path) = Self::resolve_relative(from_dir, &specifier) {
                resolved.push(path);
            }
        }
        resolved.sort();
        resolved.dedup();
        Ok(resolved)
    }
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut owned = path.as_os_str().to_os_string();
    owned.push(".");
    owned.push(ext);
    PathBuf::from(owned)
}

fn normalize(path: &Path) -> PathBuf {
    // `Path::canonicalize` would also resolve symlinks, which is more than
    // we need and fails for paths that don't exist yet in tests; a simple
    // lexical cleanup keeps the comparison stable.
    let mut stack: Vec<std::ffi::OsString> = Vec::new();
    for component in path.components() {
        use std::path::Component::*;
        match component {
            CurDir => {}
            ParentDir => {
                stack.pop();
            }
            other => stack.push(other.as_os_str().to_os_string()),
        }
    }
    stack.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_relative_import_with_extension() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.ts");
        let b = dir.path().join("b.ts");
        std::fs::write(&a, "import { x } from './b';").unwrap();
        std::fs::write(&b, "export const x = 1;").unwrap();

        let extractor = RegexDependencyExtractor::new();
        let deps = extractor.extract(&a, dir.path()).unwrap();
        assert_eq!(deps, vec![normalize(&b)]);
    }

    #[test]
    fn resolves_index_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();
        let a = dir.path().join("a.ts");
        let index = dir.path().join("lib/index.ts");
        std::fs::write(&a, "import lib from './lib';").unwrap();
        std::fs::write(&index, "export default 1;").unwrap();

        let extractor = RegexDependencyExtractor::new();
        let deps = extractor.extract(&a, dir.path()).unwrap();
        assert_eq!(deps, vec![normalize(&index)]);
    }

    #[test]
    fn ignores_package_imports() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.ts");
        std::fs::write(&a, "import React from 'react';").unwrap();

        let extractor = RegexDependencyExtractor::new();
        let deps = extractor.extract(&a, dir.path()).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn handles_require_calls() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        std::fs::write(&a, "const b = require('./b');").unwrap();
        std::fs::write(&b, "module.exports = {};").unwrap();

        let extractor = RegexDependencyExtractor::new();
        let deps = extractor.extract(&a, dir.path()).unwrap();
        assert_eq!(deps, vec![normalize(&b)]);
    }

    #[test]
    fn missing_target_yields_no_edge() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.ts");
        std::fs::write(&a, "import { x } from './missing';").unwrap();

        let extractor = RegexDependencyExtractor::new();
        let deps = extractor.extract(&a, dir.path()).unwrap();
        assert!(deps.is_empty());
    }
}

//! Source discovery.
//!
//! Includes without `*` or `?` are literal directories (so `app/[locale]`
//! works); everything else is a glob. Ignores follow the same rule, literal
//! ignores matching by path prefix.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{trace, warn};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// What to scan and what to leave out.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
    /// Directories never descended into, such as the catalog output.
    pub exclude_dirs: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    /// Scannable files in path order.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

struct IgnoreSet {
    prefixes: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, options: &ScanOptions<'_>) -> Self {
        let mut prefixes = options.exclude_dirs.clone();
        let mut globs = Vec::new();

        for raw in options.ignores {
            if !is_glob_pattern(raw) {
                prefixes.push(base_dir.join(raw));
                continue;
            }
            match Pattern::new(raw) {
                Ok(pattern) => globs.push(pattern),
                Err(err) => warn!(pattern = %raw, error = %err, "invalid ignore pattern"),
            }
        }
        if options.ignore_test_files {
            globs.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self { prefixes, globs }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
            || self.globs.iter().any(|p| p.matches_path(path))
    }
}

fn roots(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for include in includes {
        let full = base_dir.join(include);
        if !is_glob_pattern(include) {
            if full.exists() {
                roots.push(full);
            } else {
                warn!(path = %full.display(), "include path does not exist");
            }
            continue;
        }
        match glob(&full.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(err) => warn!(pattern = %include, error = %err, "invalid include pattern"),
        }
    }
    roots
}

/// Find every scannable source file under `base_dir`.
pub fn scan_files(base_dir: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, options);
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for root in roots(base_dir, options.includes) {
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !ignores.is_ignored(entry.path()));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    skipped_count += 1;
                    warn!(error = %err, "cannot access path");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_scannable_file(entry.path()) {
                trace!(path = %entry.path().display(), "found source file");
                files.insert(entry.into_path());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

pub fn is_scannable_file(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts"));
    !is_declaration
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

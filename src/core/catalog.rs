//! Per-file message catalogs and staged, atomic output.
//!
//! The catalog of `src/a/b.js` lands at `<messagesDir>/src/a/b.js.json`, so
//! `b.js` and `b.tsx` in one directory never share a catalog. Outputs
//! of one file are first written to temporary files next to their targets and
//! only moved into place once every output of that file has been staged.

use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::core::data::MessageDescriptor;

/// Where catalogs are written.
#[derive(Debug, Clone)]
pub struct CatalogLayout {
    /// Directory catalogs are written under.
    pub messages_dir: PathBuf,
    /// Source paths are mirrored relative to this directory.
    pub root: PathBuf,
}

impl CatalogLayout {
    pub fn new(messages_dir: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            messages_dir: messages_dir.into(),
            root: root.into(),
        }
    }

    /// Catalog path for `source`: its full file name with `.json` appended.
    ///
    /// Components that would escape the messages directory (`..`, roots,
    /// prefixes) are dropped.
    pub fn catalog_path(&self, source: &Path) -> PathBuf {
        let relative = source.strip_prefix(&self.root).unwrap_or(source);
        let mut path = self.messages_dir.clone();
        let mut parts = relative.components().filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        });
        let Some(mut file_name) = parts.next_back().map(OsString::from) else {
            return path.join("index.json");
        };
        path.extend(parts);
        file_name.push(".json");
        path.push(file_name);
        path
    }
}

/// Serialize a catalog: pretty JSON with a trailing newline.
pub fn render_catalog(messages: &[MessageDescriptor]) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(messages).context("Failed to serialize message catalog")?;
    json.push('\n');
    Ok(json)
}

/// Content written to a temporary file, waiting to replace `target`.
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Write `content` to a temporary file in `target`'s directory.
    pub fn stage(target: &Path, content: &str) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", target.display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to write {}", target.display()))?;

        // Keep the permissions of a file being replaced.
        if let Ok(metadata) = fs::metadata(target) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .with_context(|| format!("Failed to set permissions for {}", target.display()))?;
        }

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the staged content into place.
    pub fn commit(self) -> Result<PathBuf> {
        self.temp
            .persist(&self.target)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", self.target.display()))?;
        Ok(self.target)
    }
}

/// Commit all staged writes of one file.
pub fn commit_all(staged: Vec<StagedWrite>) -> Result<Vec<PathBuf>> {
    staged.into_iter().map(StagedWrite::commit).collect()
}

use serde::{Deserialize, Serialize};

/// A point in a source file. `line` is 1-based, `column` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Columns are shown 1-based, like the rest of the CLI output.
        write!(f, "{}:{}", self.line, self.column + 1)
    }
}

/// Start and end of a declaration in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }
}

/// Identity of the file being processed.
///
/// `display_path` is what ends up in diagnostics and in the `file` field of
/// descriptors: the path relative to the project root when a root is known,
/// otherwise the path as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    pub path: String,
    pub display_path: String,
}

impl FileIdentity {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            display_path: path.clone(),
            path,
        }
    }

    /// Build an identity whose display path is relative to `root`.
    pub fn relative_to(path: impl Into<String>, root: &std::path::Path) -> Self {
        let path = path.into();
        let display_path = std::path::Path::new(&path)
            .strip_prefix(root)
            .map(|rel| rel.to_string_lossy().to_string())
            .unwrap_or_else(|_| {
                path.strip_prefix("./")
                    .map(str::to_string)
                    .unwrap_or_else(|| path.clone())
            });
        Self { path, display_path }
    }
}

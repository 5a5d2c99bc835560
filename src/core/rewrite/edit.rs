use std::ops::Range;

use tracing::warn;

/// Replace `range` of the source with `text`. An empty range inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }
}

/// Apply `edits` to `code`.
///
/// Edits are applied back to front. An insertion and a deletion starting at
/// the same offset leave the inserted text in place of the deleted one.
/// Overlapping edits are dropped with a warning.
pub fn apply_edits(code: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| {
        (b.range.start, b.range.end).cmp(&(a.range.start, a.range.end))
    });

    let mut output = code.to_string();
    let mut limit = code.len();
    for edit in edits {
        if edit.range.end > limit || edit.range.start > edit.range.end {
            warn!(range = ?edit.range, "dropping overlapping source edit");
            continue;
        }
        output.replace_range(edit.range.clone(), &edit.text);
        limit = edit.range.start;
    }
    output
}

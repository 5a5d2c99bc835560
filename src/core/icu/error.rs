/// A grammar violation found by the ICU checker.
///
/// Formats as `Expected a, b, or c but "x" found.`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Expected {} but {} found.", format_expected(.expected), format_found(.found))]
pub struct IcuSyntaxError {
    /// Byte offset into the message text.
    pub offset: usize,
    /// 1-based line within the message text.
    pub line: usize,
    /// 1-based column within the message text.
    pub column: usize,
    /// Productions that would have been accepted, sorted and deduplicated.
    pub expected: Vec<String>,
    /// The offending character, or `None` at end of input.
    pub found: Option<char>,
}

fn format_expected(expected: &[String]) -> String {
    match expected {
        [] => "end of input".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

fn format_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c.to_string()),
        None => "end of input".to_string(),
    }
}

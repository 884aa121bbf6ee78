use regex::Regex;
use serde::Serialize;

/// Location of one pattern occurrence, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub offset: usize,
    pub length: usize,
}

impl MatchSpan {
    /// Byte offset one past the end of the match
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Find all non-overlapping occurrences of `pattern` in `text`, left to right.
///
/// Empty matches are reported but never re-matched at the same position, so
/// the scan always terminates.
pub fn find_all(text: &str, pattern: &Regex) -> Vec<MatchSpan> {
    pattern
        .find_iter(text)
        .map(|m| MatchSpan {
            offset: m.start(),
            length: m.len(),
        })
        .collect()
}

//! Ranking filter: scores candidate files against a search expression and
//! returns the matches sorted by descending relevance.
//!
//! Cancellation is cooperative: the flag is polled once per candidate, never
//! mid-scoring, and a cancelled run yields `Err(Cancelled)` rather than a
//! partial result so callers can tell it apart from "zero matches".

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::fuzzy;

/// A candidate file, scored in place by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Project-relative path with `/` separators.
    pub path: String,
    /// Filename component (suffix of `path`).
    pub name: String,
    /// Relevance score, set once per filter invocation when a match is found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl FileEntry {
    /// Build an entry from a relative path, deriving the filename component.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit('/')
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            path,
            name,
            score: None,
        }
    }

    /// Char offset of the first filename character within `path`.
    pub fn filename_start(&self) -> usize {
        self.path.chars().count() - self.name.chars().count()
    }
}

/// The filter was aborted through its cancellation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation cancelled")
    }
}

/// Filter `entries` by fuzzy-matching `expression` and rank the survivors.
///
/// An empty expression is a deliberate pass-through: the input comes back
/// unchanged and unscored. Otherwise all whitespace is stripped from the
/// expression, every entry is scored against its path, entries with a
/// positive score keep it, and the result is sorted by descending score.
/// The sort is stable, so equal scores keep their input order.
pub fn filter_and_rank(
    expression: &str,
    entries: Vec<FileEntry>,
    cancel: &AtomicBool,
) -> Result<Vec<FileEntry>, Cancelled> {
    if expression.is_empty() {
        return Ok(entries);
    }

    let pattern: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    let mut result = Vec::new();
    for mut entry in entries {
        if cancel.load(Ordering::Relaxed) {
            return Err(Cancelled);
        }

        let m = fuzzy::score_match(&pattern, &entry.path, entry.filename_start());
        if m.score > 0 {
            entry.score = Some(m.score);
            result.push(entry);
        }
    }

    result.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(paths: &[&str]) -> Vec<FileEntry> {
        paths.iter().map(|p| FileEntry::new(*p)).collect()
    }

    #[test]
    fn derives_filename_component() {
        let entry = FileEntry::new("src/cmd/find.rs");
        assert_eq!(entry.name, "find.rs");
        assert_eq!(entry.filename_start(), 8);

        let bare = FileEntry::new("README");
        assert_eq!(bare.name, "README");
        assert_eq!(bare.filename_start(), 0);
    }

    #[test]
    fn empty_expression_is_a_passthrough() {
        let cancel = AtomicBool::new(false);
        let input = entries(&["b/two.rs", "a/one.rs"]);
        let output = filter_and_rank("", input.clone(), &cancel).unwrap();
        assert_eq!(output, input);
        assert!(output.iter().all(|e| e.score.is_none()));
    }

    #[test]
    fn drops_non_matches_and_scores_the_rest() {
        let cancel = AtomicBool::new(false);
        let input = entries(&["src/main.rs", "docs/notes.txt"]);
        let output = filter_and_rank("ma", input, &cancel).unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].path, "src/main.rs");
        assert!(output[0].score.is_some_and(|s| s > 0));
    }

    #[test]
    fn whitespace_in_expression_is_stripped() {
        let cancel = AtomicBool::new(false);
        let spaced = filter_and_rank(" m  a ", entries(&["src/main.rs"]), &cancel).unwrap();
        let compact = filter_and_rank("ma", entries(&["src/main.rs"]), &cancel).unwrap();
        assert_eq!(spaced, compact);
    }

    #[test]
    fn whitespace_only_expression_matches_nothing() {
        // Not the empty-expression pass-through: the stripped pattern is
        // empty and no candidate can score.
        let cancel = AtomicBool::new(false);
        let output = filter_and_rank("   ", entries(&["src/main.rs"]), &cancel).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn sorts_by_descending_score_stably() {
        let cancel = AtomicBool::new(false);
        // "x/ma" outscores "src/main.rs"; the duplicates tie and keep order.
        let input = entries(&["src/main.rs", "x/ma", "src/main.rs"]);
        let output = filter_and_rank("ma", input, &cancel).unwrap();
        let paths: Vec<&str> = output.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["x/ma", "src/main.rs", "src/main.rs"]);
        assert!(output[0].score > output[1].score);
        assert_eq!(output[1].score, output[2].score);
    }

    #[test]
    fn cancellation_aborts_without_partial_result() {
        let cancel = AtomicBool::new(true);
        let result = filter_and_rank("ma", entries(&["src/main.rs", "x/ma"]), &cancel);
        assert_eq!(result, Err(Cancelled));
    }

    #[test]
    fn empty_expression_ignores_cancellation() {
        let cancel = AtomicBool::new(true);
        let input = entries(&["src/main.rs"]);
        let output = filter_and_rank("", input.clone(), &cancel).unwrap();
        assert_eq!(output, input);
    }
}

//! Output formatting utilities with TTY auto-detection and semantic styling.

use std::io::IsTerminal;

use clap::ValueEnum;
use colored::{ColoredString, Colorize};

/// Output format for commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-optimized: colors, tables, highlighted matches
    #[default]
    Pretty,
    /// LLM-optimized: no colors, pipe-delimited, full paths
    Plain,
    /// Machine-readable JSON
    Json,
    /// Machine-readable YAML
    Yaml,
}

impl OutputFormat {
    /// Resolve the output format, applying TTY auto-detection.
    ///
    /// If format is Pretty but stdout is not a TTY, returns Plain.
    pub fn resolve(self) -> Self {
        match self {
            OutputFormat::Pretty if !std::io::stdout().is_terminal() => OutputFormat::Plain,
            other => other,
        }
    }
}

// ============================================================================
// Semantic Styling - Centralized color/style decisions
// ============================================================================

/// Style for scores - always dimmed.
pub fn style_score(score: i64) -> ColoredString {
    score.to_string().dimmed()
}

/// Render a path with its matched char offsets highlighted.
///
/// Offsets are char offsets into `path`, strictly increasing; characters at
/// those offsets are bolded, the rest is left as-is.
pub fn highlight_match(path: &str, indices: &[usize]) -> String {
    let mut out = String::with_capacity(path.len());
    let mut next = indices.iter().peekable();
    for (i, c) in path.chars().enumerate() {
        if next.peek().is_some_and(|&&idx| idx == i) {
            out.push_str(&c.to_string().bold().cyan().to_string());
            next.next();
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Terminal utilities
// ============================================================================

/// Get terminal width, defaulting to 80 if unavailable.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

// ============================================================================
// Path utilities
// ============================================================================

/// Truncate a string from the front, showing "..suffix".
/// Useful for paths where the end is more meaningful.
pub fn truncate_front(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 2 {
        "..".to_string()
    } else {
        let skip = char_count - (max_chars - 2);
        let truncated: String = s.chars().skip(skip).collect();
        format!("..{}", truncated)
    }
}

/// Truncate a string from the back, showing "prefix…".
pub fn truncate_back(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 1).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_front_keeps_suffix() {
        assert_eq!(truncate_front("src/cmd/find.rs", 20), "src/cmd/find.rs");
        assert_eq!(truncate_front("src/cmd/find.rs", 9), "..find.rs");
        assert_eq!(truncate_front("src/cmd/find.rs", 2), "..");
    }

    #[test]
    fn truncate_back_keeps_prefix() {
        assert_eq!(truncate_back("find.rs", 10), "find.rs");
        assert_eq!(truncate_back("a_rather_long_name.rs", 7), "a_rath…");
        assert_eq!(truncate_back("abc", 1), "…");
    }

    #[test]
    fn highlight_consumes_each_offset_once() {
        colored::control::set_override(false);
        let out = highlight_match("src/main.rs", &[4, 5]);
        // With colors disabled the highlighted string is unchanged.
        assert_eq!(out, "src/main.rs");
        colored::control::unset_override();
    }
}

//! Project-tree scanning: git root discovery and candidate file collection.
//!
//! The scan is single-threaded and synchronous. Traversal skips hidden
//! entries, configured directory names, and nested git repositories, so the
//! candidate list stays bounded to the current project.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use regex::Regex;

use crate::config::env_string;
use crate::filter::FileEntry;

/// Options controlling a candidate scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Maximum directory depth below the scan root. None = unlimited.
    pub max_depth: Option<usize>,
    /// Include entries whose name starts with a dot.
    pub include_hidden: bool,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
    /// Relative paths matching this pattern are dropped.
    pub exclude: Option<Regex>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_exclude(mut self, pattern: Option<Regex>) -> Self {
        self.exclude = pattern;
        self
    }
}

/// Open the git repository from current directory.
/// Returns an error if not in a git repository.
pub fn open() -> Result<Repository, String> {
    Repository::discover(".").map_err(|e| {
        if e.code() == git2::ErrorCode::NotFound {
            "Not in a git repository. quickopen requires a git repo to define scope.".to_string()
        } else {
            format!("Failed to open git repository: {}", e.message())
        }
    })
}

/// Get the git root (working directory) from an opened repository.
pub fn git_root(repo: &Repository) -> PathBuf {
    repo.workdir()
        .expect("Repository should have a working directory")
        .to_path_buf()
}

/// Find the project root: `QUICKOPEN_ROOT` override, else the git root.
pub fn find_project_root() -> Result<PathBuf, String> {
    if let Some(root) = env_string("QUICKOPEN_ROOT") {
        let path = PathBuf::from(&root);
        if !path.is_dir() {
            return Err(format!("QUICKOPEN_ROOT is not a directory: {}", root));
        }
        return Ok(path);
    }

    let repo = open()?;
    Ok(git_root(&repo))
}

/// Check if a directory is a git root (contains .git).
pub fn is_git_root(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Resolve an optional scope argument to an absolute directory inside the
/// project root.
///
/// Path resolution rules:
/// - None or empty: the project root
/// - ".": PWD
/// - "./X/Y": PWD-relative
/// - "/X/Y": Absolute
/// - "X/Y" (no leading ./ or /): root-relative
pub fn resolve_scope(root: &Path, path_arg: Option<&str>) -> Result<PathBuf, String> {
    let pwd = env::current_dir().map_err(|e| format!("Cannot get current directory: {}", e))?;

    let target = match path_arg {
        None | Some("") => root.to_path_buf(),
        Some(".") => pwd.clone(),
        Some(p) if p.starts_with("./") => {
            let rel = p.strip_prefix("./").unwrap_or(p);
            pwd.join(rel)
        }
        Some(p) if p.starts_with('/') => PathBuf::from(p),
        Some(p) => root.join(p),
    };

    let target_canonical = target.canonicalize().unwrap_or_else(|_| target.clone());
    let root_canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    if !target_canonical.starts_with(&root_canonical) {
        return Err(format!(
            "Path must be within the project root: {} (root: {})",
            target.display(),
            root.display()
        ));
    }

    if !target_canonical.is_dir() {
        return Err(format!("Not a directory: {}", target.display()));
    }

    Ok(target_canonical)
}

/// Collect candidate files below `start`, as entries whose paths are
/// relative to the project `root`.
///
/// Results are sorted by path so the candidate order (and therefore the
/// order of equal-score ties after ranking) is deterministic.
pub fn collect_files(
    root: &Path,
    start: &Path,
    options: &ScanOptions,
) -> Result<Vec<FileEntry>, String> {
    let root_canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let mut entries = Vec::new();
    collect_recursive(&root_canonical, start, options, 0, &mut entries)?;
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn collect_recursive(
    root: &Path,
    dir: &Path,
    options: &ScanOptions,
    depth: usize,
    out: &mut Vec<FileEntry>,
) -> Result<(), String> {
    let read = fs::read_dir(dir)
        .map_err(|e| format!("failed to read directory {}: {}", dir.display(), e))?;

    for entry in read.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if !options.include_hidden && name_str.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            if options.exclude_dirs.iter().any(|d| d == name_str.as_ref()) {
                continue;
            }

            // Stop at nested git repos (the root itself is allowed).
            if path != root && is_git_root(&path) {
                continue;
            }

            if let Some(max) = options.max_depth {
                if depth + 1 > max {
                    continue;
                }
            }

            collect_recursive(root, &path, options, depth + 1, out)?;
            continue;
        }

        let rel = relative_path(root, &path);
        if let Some(ref pattern) = options.exclude {
            if pattern.is_match(&rel) {
                continue;
            }
        }

        out.push(FileEntry::new(rel));
    }

    Ok(())
}

/// Path relative to the project root, with `/` separators.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path
        .strip_prefix(root)
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|_| path.to_path_buf());

    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_options_builder() {
        let options = ScanOptions::new()
            .with_max_depth(Some(2))
            .with_hidden(true)
            .with_exclude_dirs(vec!["target".to_string()]);
        assert_eq!(options.max_depth, Some(2));
        assert!(options.include_hidden);
        assert_eq!(options.exclude_dirs, vec!["target".to_string()]);
        assert!(options.exclude.is_none());
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/tmp/project");
        let rel = relative_path(root, &root.join("src").join("main.rs"));
        assert_eq!(rel, "src/main.rs");
    }
}

//! Configuration system for the quickopen CLI.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (QUICKOPEN_*)
//! 3. Project files (.quickopen.yaml, walked from project root to cwd)
//! 4. User global (~/.config/quickopen/config.yaml)
//! 5. Built-in defaults (lowest priority)
//!
//! This module provides:
//! - `Config` struct with all settings
//! - `EnvVar` registry for documentation
//! - Helper functions for env var parsing
//! - Config loading and merging

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration for the quickopen CLI.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Scan behavior
    pub scan: ScanConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Behavior settings
    pub behavior: BehaviorConfig,
}

/// Scan settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names never descended into
    pub exclude_dirs: Vec<String>,
    /// Include hidden files and directories
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: vec!["target".to_string(), "node_modules".to_string()],
            include_hidden: false,
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum number of results printed by `find` (null = unlimited)
    pub max_results: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: Some(25),
        }
    }
}

/// Behavior defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress hints
    pub quiet: bool,
}

// ============================================================================
// Config Source Tracking
// ============================================================================

/// Source of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in default
    Default,
    /// User global config (~/.config/quickopen/config.yaml)
    UserGlobal,
    /// Project config file (.quickopen.yaml)
    ProjectFile(String),
    /// Environment variable
    EnvVar(String),
    /// CLI flag
    CliFlag,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::UserGlobal => write!(f, "~/.config/quickopen/config.yaml"),
            ConfigSource::ProjectFile(path) => write!(f, "{}", path),
            ConfigSource::EnvVar(name) => write!(f, "${}", name),
            ConfigSource::CliFlag => write!(f, "CLI flag"),
        }
    }
}

// ============================================================================
// Environment Variable Registry
// ============================================================================

/// Environment variable definition for documentation.
pub struct EnvVar {
    /// Variable name (e.g., "QUICKOPEN_FORMAT")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default value or behavior
    pub default: &'static str,
    /// Config path this maps to (e.g., "display.max_results")
    pub config_path: &'static str,
    /// Valid values (if enumerable)
    pub values: Option<&'static str>,
}

/// Registry of all supported environment variables.
pub const ENV_VARS: &[EnvVar] = &[
    EnvVar {
        name: "NO_COLOR",
        description: "Disable colored output (standard)",
        default: "unset",
        config_path: "display.color",
        values: Some("any non-empty value"),
    },
    EnvVar {
        name: "FORCE_COLOR",
        description: "Force colored output even when not a TTY",
        default: "unset",
        config_path: "display.color",
        values: Some("any non-empty value"),
    },
    EnvVar {
        name: "QUICKOPEN_FORMAT",
        description: "Default output format",
        default: "pretty (auto-detects TTY)",
        config_path: "display.format",
        values: Some("pretty, plain, json, yaml"),
    },
    EnvVar {
        name: "QUICKOPEN_MAX_RESULTS",
        description: "Maximum number of results printed by find",
        default: "25",
        config_path: "display.max_results",
        values: Some("number"),
    },
    EnvVar {
        name: "QUICKOPEN_HIDDEN",
        description: "Include hidden files and directories in scans",
        default: "false",
        config_path: "scan.include_hidden",
        values: Some("1, true, yes"),
    },
    EnvVar {
        name: "QUICKOPEN_QUIET",
        description: "Suppress hint messages",
        default: "false",
        config_path: "behavior.quiet",
        values: Some("1, true, yes"),
    },
    EnvVar {
        name: "QUICKOPEN_ROOT",
        description: "Override git root detection",
        default: "auto-detected",
        config_path: "workspace.root",
        values: Some("path"),
    },
];

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Parse a boolean environment variable.
///
/// Returns `Some(true)` if the variable is set to a truthy value (1, true, yes),
/// `Some(false)` if set to a falsy value (0, false, no),
/// and `None` if unset or empty.
pub fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| {
        if v.is_empty() {
            return None;
        }
        let lower = v.to_lowercase();
        match lower.as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    })
}

/// Parse a string environment variable.
///
/// Returns `Some(value)` if set and non-empty, `None` otherwise.
pub fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse a usize environment variable.
///
/// Returns `Some(value)` if set and parseable, `None` otherwise.
pub fn env_usize(name: &str) -> Option<usize> {
    env_string(name).and_then(|v| v.parse().ok())
}

// ============================================================================
// Config Loading
// ============================================================================

/// Project config file name
pub const CONFIG_FILE: &str = ".quickopen.yaml";

/// Load configuration from all sources.
///
/// Resolution order (later overrides earlier):
/// 1. Built-in defaults
/// 2. User global (~/.config/quickopen/config.yaml)
/// 3. Project files (walk from project root to cwd)
///
/// Does not apply CLI flags (those are handled by args resolution).
/// Does not apply ENV vars (those are checked at point of use).
pub fn load_config(root: &Path, cwd: &Path) -> LoadedConfig {
    let mut config = Config::default();
    let mut sources = vec![ConfigSource::Default];

    // 1. User global config
    if let Some(user_path) = user_config_path() {
        if let Some(user_config) = load_file(&user_path) {
            merge(&mut config, &user_config);
            sources.push(ConfigSource::UserGlobal);
        }
    }

    // 2. Walk from project root to cwd, loading config files at each level
    for path in collect_config_paths(root, cwd) {
        if let Some(file_config) = load_file(&path) {
            let rel_path = path
                .strip_prefix(root)
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| path.to_string_lossy().to_string());
            merge(&mut config, &file_config);
            sources.push(ConfigSource::ProjectFile(rel_path));
        }
    }

    LoadedConfig { config, sources }
}

/// Result of loading configuration with source tracking.
#[derive(Debug)]
pub struct LoadedConfig {
    /// The merged configuration
    pub config: Config,
    /// Sources that contributed to this config (in order of application)
    pub sources: Vec<ConfigSource>,
}

/// Get the user config file path (~/.config/quickopen/config.yaml).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quickopen").join("config.yaml"))
}

/// Load a config file, returning None if it doesn't exist or can't be parsed.
pub fn load_file(path: &Path) -> Option<Config> {
    let content = fs::read_to_string(path).ok()?;
    serde_yaml::from_str(&content).ok()
}

/// Collect config file paths from root to cwd (inclusive).
///
/// Returns paths in order from root to cwd (so later ones override earlier).
fn collect_config_paths(root: &Path, cwd: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let cwd = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());

    let file = root.join(CONFIG_FILE);
    if file.exists() {
        paths.push(file);
    }

    if !cwd.starts_with(&root) {
        return paths;
    }

    let mut current = root.clone();
    let rel_path = cwd.strip_prefix(&root).unwrap_or(Path::new(""));
    for component in rel_path.components() {
        current = current.join(component);
        let file = current.join(CONFIG_FILE);
        if file.exists() {
            paths.push(file);
        }
    }

    paths
}

/// Merge overlay config into base config.
///
/// Non-default values in overlay override values in base.
/// For Vec fields, overlay replaces entirely (not appended).
pub fn merge(base: &mut Config, overlay: &Config) {
    let default_scan = ScanConfig::default();
    if overlay.scan.exclude_dirs != default_scan.exclude_dirs {
        base.scan.exclude_dirs = overlay.scan.exclude_dirs.clone();
    }
    if overlay.scan.include_hidden != default_scan.include_hidden {
        base.scan.include_hidden = overlay.scan.include_hidden;
    }

    let default_display = DisplayConfig::default();
    if overlay.display.max_results != default_display.max_results {
        base.display.max_results = overlay.display.max_results;
    }

    let default_behavior = BehaviorConfig::default();
    if overlay.behavior.quiet != default_behavior.quiet {
        base.behavior.quiet = overlay.behavior.quiet;
    }
}

/// Generate JSON schema for the config.
pub fn json_schema() -> String {
    let schema = schemars::schema_for!(Config);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

/// Check if quiet mode is enabled (suppress hints).
///
/// Checks both config.behavior.quiet and QUICKOPEN_QUIET env var.
pub fn is_quiet(config: &Config) -> bool {
    config.behavior.quiet || env_bool("QUICKOPEN_QUIET").unwrap_or(false)
}

/// Effective result limit: QUICKOPEN_MAX_RESULTS overrides the config value.
pub fn max_results(config: &Config) -> Option<usize> {
    env_usize("QUICKOPEN_MAX_RESULTS").map(Some).unwrap_or(config.display.max_results)
}

/// Generate a template config file with comments.
pub fn template_config() -> String {
    r#"# quickopen configuration
# Place at the project root (or any subdirectory) as .quickopen.yaml.
# Deeper files override shallower ones; user global config lives at
# ~/.config/quickopen/config.yaml.

scan:
  # Directory names never descended into
  exclude_dirs:
    - target
    - node_modules
  # Include hidden files and directories
  include_hidden: false

display:
  # Maximum number of results printed by find (null = unlimited)
  max_results: 25

behavior:
  # Suppress hint messages
  quiet: false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_non_default_overlay_values() {
        let mut base = Config::default();
        let mut overlay = Config::default();
        overlay.scan.include_hidden = true;
        overlay.display.max_results = None;
        overlay.behavior.quiet = true;

        merge(&mut base, &overlay);
        assert!(base.scan.include_hidden);
        assert_eq!(base.display.max_results, None);
        assert!(base.behavior.quiet);
        // Untouched fields keep their defaults.
        assert_eq!(base.scan.exclude_dirs, ScanConfig::default().exclude_dirs);
    }

    #[test]
    fn merge_keeps_base_when_overlay_is_default() {
        let mut base = Config::default();
        base.scan.exclude_dirs = vec!["dist".to_string()];
        let overlay = Config::default();

        merge(&mut base, &overlay);
        assert_eq!(base.scan.exclude_dirs, vec!["dist".to_string()]);
    }

    #[test]
    fn template_parses_back_to_defaults() {
        let parsed: Config = serde_yaml::from_str(&template_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.scan.exclude_dirs, defaults.scan.exclude_dirs);
        assert_eq!(parsed.display.max_results, defaults.display.max_results);
        assert_eq!(parsed.behavior.quiet, defaults.behavior.quiet);
    }
}

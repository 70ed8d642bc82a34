//! Shared CLI argument structs for consistent flag definitions across commands.
//!
//! These structs centralize common flags like format and scan options.
//! Use `#[command(flatten)]` to include them in command-specific Args structs.

use clap::Args;
use regex::Regex;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::scan::ScanOptions;

// ============================================================================
// FormatArgs - Output format flags
// ============================================================================

/// Common output format flags.
///
/// Provides consistent --format/-f and --json flags across commands.
/// Use `resolve()` to get the effective format with TTY auto-detection.
#[derive(Args, Clone, Debug, Default)]
pub struct FormatArgs {
    /// Output format (auto-detects TTY for pretty vs plain)
    #[arg(short = 'f', long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Output as JSON (shorthand for --format=json)
    #[arg(long, conflicts_with = "format", global = true)]
    pub json: bool,
}

impl FormatArgs {
    /// Resolve the effective output format.
    ///
    /// Handles --json shorthand and applies TTY auto-detection for pretty mode.
    pub fn resolve(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.resolve()
        }
    }
}

// ============================================================================
// ScanArgs - Candidate scan flags
// ============================================================================

/// Common flags controlling the candidate scan.
///
/// Use `to_scan_options()` to combine flags with the loaded config.
#[derive(Args, Clone, Debug, Default)]
pub struct ScanArgs {
    /// Include hidden files and directories
    #[arg(long, global = true)]
    pub hidden: bool,

    /// Maximum directory depth below the scan root
    #[arg(long, value_name = "N", global = true)]
    pub max_depth: Option<usize>,

    /// Drop paths matching this regular expression
    #[arg(short = 'x', long, value_name = "PATTERN", global = true)]
    pub exclude: Option<String>,
}

impl ScanArgs {
    /// Convert to ScanOptions, layering CLI flags over config values.
    pub fn to_scan_options(&self, config: &Config) -> Result<ScanOptions, String> {
        let exclude = match &self.exclude {
            Some(pattern) => Some(
                Regex::new(pattern)
                    .map_err(|e| format!("invalid --exclude pattern: {}", e))?,
            ),
            None => None,
        };

        let include_hidden = self.hidden
            || config.scan.include_hidden
            || crate::config::env_bool("QUICKOPEN_HIDDEN").unwrap_or(false);

        Ok(ScanOptions::new()
            .with_max_depth(self.max_depth)
            .with_hidden(include_hidden)
            .with_exclude_dirs(config.scan.exclude_dirs.clone())
            .with_exclude(exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_args_layer_over_config() {
        let mut config = Config::default();
        config.scan.include_hidden = true;

        let args = ScanArgs {
            hidden: false,
            max_depth: Some(3),
            exclude: Some(r"\.lock$".to_string()),
        };

        let options = args.to_scan_options(&config).unwrap();
        assert!(options.include_hidden);
        assert_eq!(options.max_depth, Some(3));
        assert!(options.exclude.is_some_and(|re| re.is_match("Cargo.lock")));
        assert_eq!(options.exclude_dirs, config.scan.exclude_dirs);
    }

    #[test]
    fn invalid_exclude_pattern_is_an_error() {
        let args = ScanArgs {
            hidden: false,
            max_depth: None,
            exclude: Some("[".to_string()),
        };
        assert!(args.to_scan_options(&Config::default()).is_err());
    }
}

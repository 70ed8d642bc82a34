use std::path::Path;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::args::{FormatArgs, ScanArgs};
use crate::config::Config;
use crate::output::OutputFormat;
use crate::scan;

#[derive(Args)]
pub struct ListArgs {
    /// Path to list files from (root-relative, ./pwd-relative, or absolute)
    #[arg(default_value = "")]
    path: String,

    #[command(flatten)]
    scan: ScanArgs,

    #[command(flatten)]
    format: FormatArgs,
}

pub fn run(args: ListArgs, root: &Path, config: &Config) -> Result<(), String> {
    let format = args.format.resolve();

    let path_arg = if args.path.is_empty() {
        None
    } else {
        Some(args.path.as_str())
    };

    let scope = scan::resolve_scope(root, path_arg)?;
    let options = args.scan.to_scan_options(config)?;
    let entries = scan::collect_files(root, &scope, &options)?;

    match format {
        OutputFormat::Pretty => {
            let root_name = root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "project".to_string());
            println!("{}", root_name.bold());
            println!("{} files", entries.len().to_string().bold());
            println!();
            for entry in &entries {
                println!("{}", entry.path);
            }
            Ok(())
        }
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.path);
            }
            Ok(())
        }
        OutputFormat::Json => {
            let output = ListOutput {
                root: root.to_string_lossy().to_string(),
                count: entries.len(),
                files: entries.iter().map(|e| e.path.as_str()).collect(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("JSON serialization failed: {}", e))?;
            println!("{}", json);
            Ok(())
        }
        OutputFormat::Yaml => {
            let output = ListOutput {
                root: root.to_string_lossy().to_string(),
                count: entries.len(),
                files: entries.iter().map(|e| e.path.as_str()).collect(),
            };
            let yaml = serde_yaml::to_string(&output)
                .map_err(|e| format!("YAML serialization failed: {}", e))?;
            print!("{}", yaml);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    root: String,
    count: usize,
    files: Vec<&'a str>,
}

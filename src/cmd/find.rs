use std::path::Path;
use std::sync::atomic::AtomicBool;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::args::{FormatArgs, ScanArgs};
use crate::config::{self, Config, is_quiet};
use crate::filter::{self, FileEntry};
use crate::fuzzy;
use crate::output::{self, OutputFormat};
use crate::scan;

#[derive(Args)]
pub struct FindArgs {
    /// [path] query - Path is optional, query is required
    /// Path resolution:
    ///   (none)  → project root
    ///   .       → PWD (explicit)
    ///   ./X/Y   → PWD-relative
    ///   /X/Y    → Absolute
    ///   X/Y     → Root-relative
    #[arg(required = true, num_args = 1..=2)]
    args: Vec<String>,

    /// Maximum number of results (overrides config)
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,

    #[command(flatten)]
    scan: ScanArgs,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Clone, Serialize)]
struct FindResult {
    score: i64,
    path: String,
    name: String,
    /// Char offsets of the matched characters within `path`.
    positions: Vec<usize>,
}

pub fn run(args: FindArgs, root: &Path, config: &Config) -> Result<(), String> {
    let format = args.format.resolve();

    // Parse positional args: either [query] or [path, query]
    let (path_arg, query) = if args.args.len() == 2 {
        (Some(args.args[0].as_str()), args.args[1].clone())
    } else if args.args.len() == 1 {
        (None, args.args[0].clone())
    } else {
        return Err("query is required".to_string());
    };

    let query = query.trim().to_string();
    if query.is_empty() {
        return Err("query is required".to_string());
    }

    // Resolve scope and collect candidates
    let scope = scan::resolve_scope(root, path_arg)?;
    let options = args.scan.to_scan_options(config)?;
    let candidates = scan::collect_files(root, &scope, &options)?;
    let scanned = candidates.len();

    // The CLI runs synchronously, so the flag is never set; embedding
    // callers poll it from their own worker plumbing.
    let cancel = AtomicBool::new(false);
    let ranked = filter::filter_and_rank(&query, candidates, &cancel).map_err(|e| e.to_string())?;
    let matched = ranked.len();

    let limit = match args.limit {
        Some(n) => Some(n),
        None => config::max_results(config),
    };
    let shown: Vec<FileEntry> = match limit {
        Some(n) => ranked.into_iter().take(n).collect(),
        None => ranked,
    };

    // Re-run the scorer on the shown rows to recover match positions for
    // highlighting; the filter only records scores.
    let pattern: String = query.chars().filter(|c| !c.is_whitespace()).collect();
    let results: Vec<FindResult> = shown
        .iter()
        .map(|entry| {
            let m = fuzzy::score_match(&pattern, &entry.path, entry.filename_start());
            FindResult {
                score: entry.score.unwrap_or(m.score),
                path: entry.path.clone(),
                name: entry.name.clone(),
                positions: m.indices,
            }
        })
        .collect();

    match format {
        OutputFormat::Pretty => output_pretty(&results, root, &query, scanned, matched, config),
        OutputFormat::Plain => output_plain(&results, root, &query, scanned, matched, config),
        OutputFormat::Json => output_json(&results, root, &query, scanned, matched),
        OutputFormat::Yaml => output_yaml(&results, root, &query, scanned, matched),
    }
}

/// Row data for pretty output table.
#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "SCORE")]
    score: String,
    #[tabled(rename = "PATH")]
    path: String,
}

fn output_pretty(
    results: &[FindResult],
    root: &Path,
    query: &str,
    scanned: usize,
    matched: usize,
    config: &Config,
) -> Result<(), String> {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());

    println!("{}", root_name.bold());
    println!(
        "{} matches ({})",
        matched.to_string().bold(),
        format!("query=\"{}\", {} files scanned", query, scanned).dimmed()
    );
    if results.len() < matched {
        println!(
            "{}",
            format!("Showing top {} (use --limit to change).", results.len()).dimmed()
        );
    }
    println!();

    if results.is_empty() {
        println!("{}", "No matches.".dimmed());
        if !is_quiet(config) {
            println!(
                "{}",
                "Hint: matches need at least two adjacent pattern characters; try --hidden or a different scope".dimmed()
            );
        }
        return Ok(());
    }

    let path_max = output::terminal_width().saturating_sub(12).max(20);
    let rows: Vec<TableRow> = results
        .iter()
        .map(|r| {
            let display = output::truncate_front(&r.path, path_max);
            // Highlighting only applies when the full path is shown; a
            // truncated path no longer lines up with the char offsets.
            let path = if display == r.path {
                output::highlight_match(&r.path, &r.positions)
            } else {
                display
            };
            TableRow {
                score: output::style_score(r.score).to_string(),
                path,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    Ok(())
}

fn output_plain(
    results: &[FindResult],
    root: &Path,
    query: &str,
    scanned: usize,
    matched: usize,
    config: &Config,
) -> Result<(), String> {
    println!("Root: {}", root.display());
    println!(
        "Showing {} of {} matches (query=\"{}\", {} files scanned)",
        results.len(),
        matched,
        query,
        scanned
    );
    println!();

    if results.is_empty() {
        if !is_quiet(config) {
            println!(
                "Hint: matches need at least two adjacent pattern characters; try --hidden or a different scope"
            );
        }
        return Ok(());
    }

    println!("SCORE | PATH");
    for r in results {
        println!("{} | {}", r.score, r.path);
    }

    Ok(())
}

#[derive(Serialize)]
struct FindOutput<'a> {
    root: String,
    query: &'a str,
    scanned: usize,
    matched: usize,
    results: &'a [FindResult],
}

fn output_json(
    results: &[FindResult],
    root: &Path,
    query: &str,
    scanned: usize,
    matched: usize,
) -> Result<(), String> {
    let output = FindOutput {
        root: root.to_string_lossy().to_string(),
        query,
        scanned,
        matched,
        results,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| format!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn output_yaml(
    results: &[FindResult],
    root: &Path,
    query: &str,
    scanned: usize,
    matched: usize,
) -> Result<(), String> {
    let output = FindOutput {
        root: root.to_string_lossy().to_string(),
        query,
        scanned,
        matched,
        results,
    };

    let yaml =
        serde_yaml::to_string(&output).map_err(|e| format!("YAML serialization failed: {}", e))?;
    print!("{}", yaml);
    Ok(())
}

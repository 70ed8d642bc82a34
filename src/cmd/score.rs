use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::args::FormatArgs;
use crate::fuzzy;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ScoreArgs {
    /// Search pattern (whitespace is ignored)
    pattern: String,

    /// Candidate path to score
    path: String,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Serialize)]
struct ScoreOutput<'a> {
    pattern: &'a str,
    path: &'a str,
    filename_start: usize,
    matched: bool,
    score: i64,
    positions: &'a [usize],
}

pub fn run(args: ScoreArgs) -> Result<(), String> {
    let format = args.format.resolve();

    let pattern: String = args
        .pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if pattern.is_empty() {
        return Err("pattern is required".to_string());
    }

    // Filename component starts after the last path separator.
    let filename_start = args
        .path
        .rfind('/')
        .map(|byte| args.path[..byte].chars().count() + 1)
        .unwrap_or(0);

    let result = fuzzy::score_match(&pattern, &args.path, filename_start);

    match format {
        OutputFormat::Pretty => {
            println!("{}", output::highlight_match(&args.path, &result.indices));
            println!();
            if result.matched {
                println!("matched: {}", "yes".green());
            } else {
                println!("matched: {}", "no".dimmed());
            }
            println!("score:   {}", result.score.to_string().bold());
            println!(
                "at:      {}",
                result
                    .indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(())
        }
        OutputFormat::Plain => {
            println!(
                "{} | {} | {}",
                result.matched,
                result.score,
                result
                    .indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            Ok(())
        }
        OutputFormat::Json => {
            let output = ScoreOutput {
                pattern: &pattern,
                path: &args.path,
                filename_start,
                matched: result.matched,
                score: result.score,
                positions: &result.indices,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("JSON serialization failed: {}", e))?;
            println!("{}", json);
            Ok(())
        }
        OutputFormat::Yaml => {
            let output = ScoreOutput {
                pattern: &pattern,
                path: &args.path,
                filename_start,
                matched: result.matched,
                score: result.score,
                positions: &result.indices,
            };
            let yaml = serde_yaml::to_string(&output)
                .map_err(|e| format!("YAML serialization failed: {}", e))?;
            print!("{}", yaml);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_start_is_a_char_offset() {
        // Derivation mirrors run(): chars before the last '/' plus one.
        let path = "src/cmd/find.rs";
        let start = path
            .rfind('/')
            .map(|byte| path[..byte].chars().count() + 1)
            .unwrap_or(0);
        assert_eq!(start, 8);

        let bare = "README";
        assert_eq!(bare.rfind('/'), None);
    }
}

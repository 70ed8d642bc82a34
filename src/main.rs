use std::io;
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::env::CompleteEnv;
use clap_complete::{Shell, generate};

mod args;
mod cmd;
mod config;
mod filter;
mod fuzzy;
mod output;
mod scan;

#[derive(Parser)]
#[command(name = "quickopen")]
#[command(version = env!("QUICKOPEN_VERSION"))]
#[command(about = "Fuzzy file finder for project trees")]
#[command(
    long_about = "quickopen - Rank project files against a typed search expression.\n\nCandidates are collected from the current git repository and scored with a\nsubsequence matcher that prefers contiguous runs, word boundaries, camel-case\nstarts, and filename hits over plain path hits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank files against a search expression
    #[command(alias = "f")]
    Find(cmd::find::FindArgs),

    /// List candidate files without scoring
    #[command(alias = "ls")]
    List(cmd::list::ListArgs),

    /// Score a single pattern/path pair
    Score(cmd::score::ScoreArgs),

    /// Generate shell completion script
    Completion(CompletionArgs),

    /// Configuration introspection
    Config(cmd::config_cmd::ConfigArgs),
}

#[derive(clap::Args)]
struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Clone, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn main() {
    // Handle dynamic shell completions
    CompleteEnv::with_factory(Cli::command).complete();

    // Use try_parse to catch errors and normalize exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Print the error (includes usage for missing args)
            let _ = e.print();
            // Exit with 0 for help/version, 1 for actual errors
            let exit_code = if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                0
            } else {
                1
            };
            process::exit(exit_code);
        }
    };

    // Handle completion before workspace lookup (doesn't need a project)
    if let Commands::Completion(args) = &cli.command {
        let shell = match args.shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
        };
        generate(shell, &mut Cli::command(), "quickopen", &mut io::stdout());
        return;
    }

    // Find project root
    let root = match scan::find_project_root() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("project root not found: {}", e);
            process::exit(1);
        }
    };

    // Load config
    let cwd = std::env::current_dir().unwrap_or_else(|_| root.clone());
    let loaded_config = config::load_config(&root, &cwd);

    let result = match cli.command {
        Commands::Find(args) => cmd::find::run(args, &root, &loaded_config.config),
        Commands::List(args) => cmd::list::run(args, &root, &loaded_config.config),
        Commands::Score(args) => cmd::score::run(args),
        Commands::Config(args) => cmd::config_cmd::run(args, &root),
        Commands::Completion(_) => unreachable!(), // Handled above
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

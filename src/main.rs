use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use greenprompt::cli;

#[derive(Debug, Parser)]
#[command(name = "greenprompt")]
#[command(about = "Client for the GreenPrompt prompt-optimization service")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start an interactive optimize/analyze session
    Session,
    /// Submit a single prompt and print the full report
    Optimize {
        /// The prompt text (omit to use --example or --file)
        prompt: Option<String>,
        /// Use a named prompt from the example catalog
        #[arg(long)]
        example: Option<String>,
        /// Read the prompt from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List the example prompt catalog
    Examples,
    /// Show savings statistics from the submission history
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Check configuration and backend reachability
    Health,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Session => cli::run_session(),
        Commands::Optimize {
            prompt,
            example,
            file,
        } => cli::run_optimize(prompt, example, file),
        Commands::Examples => cli::run_examples(),
        Commands::Stats { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt, days)
        }
        Commands::Health => cli::run_health(),
    }
}

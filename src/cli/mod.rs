//! CLI command implementations and terminal presentation.
//!
//! Provides subcommand handlers for:
//! - `greenprompt session` — interactive optimize/analyze loop
//! - `greenprompt optimize` — one-shot submission with the full report
//! - `greenprompt examples` — list the example-prompt catalog
//! - `greenprompt stats` — savings summary over the submission history
//! - `greenprompt health` — config and backend reachability check

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::analytics::{logger, reporter};
use crate::api::BackendClient;
use crate::catalog;
use crate::config::{self, ClientConfig};
use crate::diff;
use crate::metrics::{MetricsAggregator, RequestMetrics};
use crate::session::Orchestrator;

/// Output format for the stats command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// greenprompt session
// ---------------------------------------------------------------------------

/// Run the interactive session loop.
///
/// Reads a line at a time: lines starting with `:` are session commands,
/// everything else is submitted as a prompt. The orchestrator and its
/// running totals live for the duration of the loop.
pub fn run_session() -> Result<()> {
    let config = ClientConfig::load();
    let client = BackendClient::from_config(&config);
    let mut orchestrator = Orchestrator::new(Box::new(client));
    let mut show_optimized = config.show_optimized;

    println!("{}", "GreenPrompt".bold().green());
    println!(
        "{}",
        "Enter a prompt to optimize it, or :help for commands.".dimmed()
    );

    let stdin = io::stdin();
    loop {
        print!("{} ", "prompt>".bold().green());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            match run_session_command(command, &mut orchestrator, &mut show_optimized) {
                SessionAction::Continue => continue,
                SessionAction::Quit => break,
            }
        }

        submit_and_report(&mut orchestrator, input, show_optimized);
    }

    Ok(())
}

enum SessionAction {
    Continue,
    Quit,
}

fn run_session_command(
    command: &str,
    orchestrator: &mut Orchestrator,
    show_optimized: &mut bool,
) -> SessionAction {
    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).unwrap_or("");

    match name {
        "help" => {
            println!("  {}           list the example prompts", ":examples".bold());
            println!("  {}  submit an example prompt", ":use <example>".bold());
            println!("  {}               toggle the optimization highlight", ":show".bold());
            println!("  {}              show the session totals", ":stats".bold());
            println!("  {}               leave the session", ":quit".bold());
        }
        "examples" => print_examples(),
        "use" => {
            let Some(example) = catalog::find(arg) else {
                println!(
                    "{}",
                    format!("No example named \"{arg}\" — try :examples.").yellow()
                );
                return SessionAction::Continue;
            };
            submit_and_report(orchestrator, example.prompt, *show_optimized);
        }
        "show" => {
            *show_optimized = !*show_optimized;
            let state = if *show_optimized { "on" } else { "off" };
            println!("{}", format!("Optimization highlight {state}.").dimmed());
        }
        "stats" => print_cumulative(orchestrator.aggregator()),
        "quit" | "exit" | "q" => return SessionAction::Quit,
        _ => println!(
            "{}",
            format!("Unknown command \":{name}\" — try :help.").yellow()
        ),
    }

    SessionAction::Continue
}

/// Drive one submission through the pipeline and print the report.
///
/// Failures surface as one generic notification, with no distinction
/// between an optimize failure and an analyze failure. When the optimize
/// phase succeeded but analysis failed, the optimized prompt and answers
/// are still shown.
fn submit_and_report(orchestrator: &mut Orchestrator, prompt: &str, show_optimized: bool) {
    println!("{}", "Prompt submitted — optimizing…".dimmed());

    match orchestrator.submit(prompt) {
        Ok(_) => {
            let state = orchestrator.state();
            if let (Some(optimization), Some(analysis)) = (&state.optimization, &state.analysis) {
                logger::log_submission(optimization, analysis);
            }
            print_report(orchestrator, show_optimized);
        }
        Err(_) => {
            println!("{}", "Failed to process the prompt.".red().bold());
            if orchestrator.state().optimization.is_some() {
                print_report(orchestrator, show_optimized);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// greenprompt optimize
// ---------------------------------------------------------------------------

/// Submit a single prompt and print the full report.
pub fn run_optimize(
    prompt: Option<String>,
    example: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let prompt = resolve_prompt(prompt, example, file)?;

    let config = ClientConfig::load();
    let client = BackendClient::from_config(&config);
    let mut orchestrator = Orchestrator::new(Box::new(client));

    println!("{}", "Prompt submitted — optimizing…".dimmed());
    let result = orchestrator.submit(&prompt);

    match result {
        Ok(_) => {
            let state = orchestrator.state();
            if let (Some(optimization), Some(analysis)) = (&state.optimization, &state.analysis) {
                logger::log_submission(optimization, analysis);
            }
            print_report(&orchestrator, config.show_optimized);
            Ok(())
        }
        Err(err) => {
            // Partial progress is still worth showing.
            if orchestrator.state().optimization.is_some() {
                print_report(&orchestrator, config.show_optimized);
            }
            Err(err)
        }
    }
}

fn resolve_prompt(
    prompt: Option<String>,
    example: Option<String>,
    file: Option<PathBuf>,
) -> Result<String> {
    if let Some(prompt) = prompt {
        return Ok(prompt);
    }

    if let Some(name) = example {
        let Some(example) = catalog::find(&name) else {
            bail!("no example named \"{name}\" — run `greenprompt examples` to list them");
        };
        return Ok(example.prompt.to_string());
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read prompt from {}", path.display()));
    }

    bail!("no prompt given — pass one as an argument, or use --example / --file");
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

/// Print the full report for the current session state: prompt view,
/// answers, per-request statistics, and the running totals.
fn print_report(orchestrator: &Orchestrator, show_optimized: bool) {
    let state = orchestrator.state();

    println!();
    println!("{}", "Prompt".bold().cyan());
    match &state.optimization {
        Some(optimization) if show_optimized => {
            println!(
                "{}",
                diff::render_highlighted(&state.prompt, &optimization.optimized_prompt)
            );
        }
        _ => println!("{}", state.prompt),
    }

    if let Some(optimization) = &state.optimization {
        println!();
        if optimization.is_cached {
            println!(
                "{} {}",
                "LLM Response".bold().cyan(),
                "[cached]".green().bold()
            );
        } else {
            println!("{}", "LLM Response".bold().cyan());
        }
        println!("  {}", "Optimized answer:".bold());
        println!("{}", indent(&optimization.optimized_answer));
        println!("  {}", "Original answer:".bold());
        println!("{}", indent(&optimization.original_answer).dimmed());
    }

    if let Some(analysis) = &state.analysis {
        let metrics = RequestMetrics::from_analysis(analysis);
        let percent = match metrics.tokens_saved_percent {
            Some(pct) => format!("{pct:.2}%"),
            None => "n/a".to_string(),
        };

        println!();
        println!("{}", "Optimization Statistics".bold().cyan());
        println!(
            "  {} {} ({})",
            "Tokens saved:       ".bold(),
            metrics.tokens_saved,
            percent
        );
        println!(
            "  {} {:.2}%",
            "Similarity (cosine):".bold(),
            metrics.similarity_cosine_percent
        );
        println!(
            "  {} {:.2}%",
            "Similarity (GPT):   ".bold(),
            metrics.similarity_gpt_percent
        );
    }

    print_cumulative(orchestrator.aggregator());
}

/// Print the session's running totals, projection, and energy display.
fn print_cumulative(aggregator: &MetricsAggregator) {
    let scaled = aggregator.scaled_projection();
    let viz = aggregator.energy_visualization();

    println!();
    println!("{}", "Session Totals".bold().cyan());
    println!(
        "  {} {}",
        "Tokens saved:     ".bold(),
        format_signed(aggregator.total_tokens_saved())
    );
    println!(
        "  {} {:.4} Wh",
        "Energy saved:     ".bold(),
        aggregator.total_energy_saved_watts()
    );
    println!(
        "  {} {} tokens, {:.2} Wh",
        "At 10000 prompts: ".bold(),
        format_signed(scaled.tokens_saved),
        scaled.energy_saved_watts
    );
    println!("  {} {}", viz.symbol, viz.text);
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// greenprompt examples
// ---------------------------------------------------------------------------

/// List the example prompt catalog.
pub fn run_examples() -> Result<()> {
    print_examples();
    Ok(())
}

fn print_examples() {
    println!("{}", "Example Prompts".bold().cyan());
    println!("{}", "=".repeat(50));

    for example in catalog::EXAMPLES {
        let preview: String = example.prompt.chars().take(60).collect();
        let preview = preview.replace('\n', " ");
        println!("  {}", example.name.bold());
        println!("    {}", format!("{preview}…").dimmed());
    }

    println!();
    println!(
        "  {}",
        "Use `greenprompt optimize --example <name>` or `:use <name>` in a session.".dimmed()
    );
}

// ---------------------------------------------------------------------------
// greenprompt stats
// ---------------------------------------------------------------------------

/// Show savings statistics from the submission history.
pub fn run_stats(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let stats = reporter::compute_stats(days);

    if stats.total_submissions == 0 {
        println!(
            "{}",
            "No data yet. Submit some prompts to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_stats_json(&stats)?,
        OutputFormat::Csv => print_stats_csv(&stats),
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &reporter::HistoryStats) {
    let viz = stats.energy_visualization();

    println!("{}", "GreenPrompt Savings Report".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!(
        "  {} {} ({} cached)",
        "Submissions:      ".bold(),
        stats.total_submissions,
        stats.cached_submissions
    );
    println!(
        "  {} {}",
        "Tokens saved:     ".bold(),
        format_signed(stats.total_tokens_saved)
    );
    println!(
        "  {} {:.1}%",
        "Avg savings:      ".bold(),
        stats.total_savings_pct
    );
    println!(
        "  {} {:.4} Wh",
        "Energy saved:     ".bold(),
        stats.total_energy_saved_watts
    );
    println!(
        "  {} {:.1}% cosine / {:.1}% GPT",
        "Avg similarity:   ".bold(),
        stats.avg_similarity_cosine_pct,
        stats.avg_similarity_gpt_pct
    );
    println!();
    println!(
        "  {} {} tokens, {:.2} Wh",
        "At 10000 prompts: ".bold(),
        format_signed(stats.scaled_tokens_saved()),
        stats.scaled_energy_saved_watts()
    );
    println!("  {} {}", viz.symbol, viz.text);
}

fn print_stats_json(stats: &reporter::HistoryStats) -> Result<()> {
    let viz = stats.energy_visualization();
    let value = serde_json::json!({
        "total_submissions": stats.total_submissions,
        "cached_submissions": stats.cached_submissions,
        "total_original_tokens": stats.total_original_tokens,
        "total_optimized_tokens": stats.total_optimized_tokens,
        "total_tokens_saved": stats.total_tokens_saved,
        "total_energy_saved_watts": stats.total_energy_saved_watts,
        "total_savings_pct": stats.total_savings_pct,
        "avg_similarity_cosine_pct": stats.avg_similarity_cosine_pct,
        "avg_similarity_gpt_pct": stats.avg_similarity_gpt_pct,
        "scaled_tokens_saved": stats.scaled_tokens_saved(),
        "scaled_energy_saved_watts": stats.scaled_energy_saved_watts(),
        "energy_visualization": viz.text,
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_stats_csv(stats: &reporter::HistoryStats) {
    println!(
        "submissions,cached,original_tokens,optimized_tokens,tokens_saved,energy_saved_watts,savings_pct"
    );
    println!(
        "{},{},{},{},{},{},{:.1}",
        stats.total_submissions,
        stats.cached_submissions,
        stats.total_original_tokens,
        stats.total_optimized_tokens,
        stats.total_tokens_saved,
        stats.total_energy_saved_watts,
        stats.total_savings_pct,
    );
}

// ---------------------------------------------------------------------------
// greenprompt health
// ---------------------------------------------------------------------------

/// Check configuration and backend reachability.
pub fn run_health() -> Result<()> {
    println!("{}", "GreenPrompt Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let config_exists = config::config_file_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Config file",
        config_exists,
        if config_exists {
            "~/.greenprompt/config.toml found"
        } else {
            "none (using defaults)"
        },
    );

    let config = ClientConfig::load();
    let client = BackendClient::from_config(&config);
    print_health_item("Backend URL", true, client.base_url());

    let reachable = client.is_reachable();
    print_health_item(
        "Backend",
        reachable,
        if reachable {
            "reachable"
        } else {
            "not reachable — check the URL or your connection"
        },
    );

    let history_exists = logger::history_log_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let entries = if history_exists {
        logger::read_all_entries().len()
    } else {
        0
    };
    print_health_item(
        "History log",
        history_exists,
        &if history_exists {
            format!("{entries} entries")
        } else {
            "no history yet".to_string()
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<15} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a signed count with comma separators for readability.
fn format_signed(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(42), "42");
        assert_eq!(format_signed(1000), "1,000");
        assert_eq!(format_signed(1234567), "1,234,567");
        assert_eq!(format_signed(-1234), "-1,234");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("one\ntwo"), "    one\n    two");
    }

    #[test]
    fn resolve_prompt_prefers_literal() {
        let prompt = resolve_prompt(
            Some("literal".to_string()),
            Some("Code Review".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(prompt, "literal");
    }

    #[test]
    fn resolve_prompt_from_example() {
        let prompt = resolve_prompt(None, Some("code review".to_string()), None).unwrap();
        assert!(prompt.contains("factorial"));
    }

    #[test]
    fn resolve_prompt_unknown_example_fails() {
        assert!(resolve_prompt(None, Some("nope".to_string()), None).is_err());
    }

    #[test]
    fn resolve_prompt_requires_a_source() {
        assert!(resolve_prompt(None, None, None).is_err());
    }
}

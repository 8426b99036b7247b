use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use graphql_query_compare::{compare_documents, parse_document, Comparison};

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// Checks whether two GraphQL query documents request the same shape once
/// fragments are inlined.
#[derive(clap::Parser, Debug)]
#[command(name = "graphql-query-compare", version)]
struct Cli {
    #[arg(help = "Path to the first GraphQL document.")]
    left: PathBuf,

    #[arg(help = "Path to the second GraphQL document.")]
    right: PathBuf,

    #[arg(help = "Print the comparison report as JSON.", long)]
    json: bool,

    #[arg(help = "Enable verbose output.", long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(&cli);

    match run(&cli) {
        Ok(Comparison::Compared(report)) if report.equivalent => ExitCode::SUCCESS,
        Ok(Comparison::Compared(_)) => ExitCode::FAILURE,
        Ok(Comparison::Skipped { .. }) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Comparison> {
    let left = parse_document(&read(&cli.left)?, &cli.left.display().to_string())?;
    let right = parse_document(&read(&cli.right)?, &cli.right.display().to_string())?;

    let comparison = compare_documents(&left, &right)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(comparison);
    }

    match &comparison {
        Comparison::Skipped { reason } => {
            tracing::warn!("Skipping comparison: {reason}.");
        }
        Comparison::Compared(report) => {
            println!("SelectionSet 1\n{}\n", report.left);
            println!("SelectionSet 2\n{}\n", report.right);
            if let Some(mismatch) = &report.mismatch {
                println!("{mismatch}\n");
            }
            println!("Are queries structurally equivalent?\n{}", report.equivalent);
        }
    }

    Ok(comparison)
}

fn read(path: &Path) -> anyhow::Result<String> {
    tracing::debug!("Reading {path:?}.");
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn setup_logger(cli: &Cli) {
    let mut log_level_warnings: Vec<String> = vec![];
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        let env_val = std::env::var("LOG_LEVEL").map(|s| s.trim().to_string());

        match env_val.as_deref() {
            Ok("DEBUG" | "debug") => tracing::Level::DEBUG,
            Ok("INFO" | "info") => tracing::Level::INFO,
            Ok("TRACE" | "trace") => tracing::Level::TRACE,
            Ok("WARN" | "warn") => tracing::Level::WARN,
            Ok(other) => {
                log_level_warnings.push(format!(
                    "Invalid `LOG_LEVEL` environment variable value: `{other}`"
                ));
                DEFAULT_LOG_LEVEL
            }
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    tracing::trace!("Initial logging level set to `{log_level}`.");

    for warning in log_level_warnings.drain(..) {
        tracing::warn!("{warning}");
    }
}

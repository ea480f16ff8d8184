//! @ai:module:intent CLI for the dataset insights pipeline
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use dataset_insights::{AnalysisConfig, Error, Pipeline, RunReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dataset-insights")]
#[command(about = "Statistics, charts and a Markdown report for query intent and sentiment datasets")]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create charts, then the report (the default)
    Run,

    /// Create the chart images only
    Charts,

    /// Generate the Markdown report and JSON summary only
    Report,

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "insights.toml")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialise logging: {e}");
    }

    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<Error>() {
                Some(err) => tracing::error!(kind = err.kind().as_str(), "Error during analysis: {}", err),
                None => tracing::error!("Error during analysis: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dataset_insights=info".parse()?),
        )
        .init();
    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let report = build_pipeline(cli.config)?.run()?;
            print_summary(&report);
        }
        Commands::Charts => {
            let charts = build_pipeline(cli.config)?.run_charts()?;
            println!("Generated files:");
            for file in &charts.files {
                println!("- {}", file.display());
            }
        }
        Commands::Report => {
            let path = build_pipeline(cli.config)?.run_report()?;
            println!("Analysis complete! {} has been generated.", path.display());
        }
        Commands::Init { output } => init_config(&output)?,
    }

    Ok(())
}

fn build_pipeline(config: Option<PathBuf>) -> Result<Pipeline> {
    Ok(Pipeline::new(load_or_default_config(config)?))
}

/// @ai:intent Load the config file when given, otherwise use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            Ok(AnalysisConfig::load(&path)?)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// @ai:intent Write the default configuration
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }
    AnalysisConfig::default().save(output)?;
    println!("Configuration written to {}", output.display());
    Ok(())
}

/// @ai:intent Print the console summary after a full run
/// @ai:effects io
fn print_summary(report: &RunReport) {
    println!();
    println!("{}", "=".repeat(50));
    println!("ANALYSIS SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Intent Dataset: {} records", format_count(report.intent_records));
    println!("Sentiment Dataset: {} records", format_count(report.sentiment_records));
    println!("Intent Categories: {}", report.intent_categories);
    println!("Sentiment Categories: {}", report.sentiment_categories);
    println!("Report: {}", report.report_path.display());
    println!("Summary: {}", report.summary_path.display());
    println!("Generated files:");
    for file in &report.charts.files {
        println!("- {}", file.display());
    }
}

fn format_count(value: usize) -> String {
    dataset_insights::MarkdownReporter::format_count(value)
}

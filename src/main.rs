//! Noter - LLM study note generator
//!
//! CLI entry point for batch generation and the interactive TUI.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;

use noter::cli::{Cli, Command};
use noter::config::Config;
use noter::llm::create_client;
use noter::notes::{NotesWorkflow, ProgressEvent};
use noter::prompts::PromptLoader;
use noter::tui;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("noter")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("noter.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Noter loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    // Dispatch command
    match cli.command {
        Some(Command::Generate { subject, output_dir }) => cmd_generate(config, &subject, output_dir).await,
        Some(Command::Tui) => cmd_tui(config).await,
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Generate notes in batch mode, printing progress to stdout
async fn cmd_generate(mut config: Config, subject: &str, output_dir: Option<PathBuf>) -> Result<()> {
    // Validate API key early
    config.validate()?;

    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }

    println!("Generating study notes");
    println!("  Subject: {}", subject);
    println!("  Model: {}", config.llm.model);
    println!();

    let llm = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let prompts = Arc::new(PromptLoader::new(std::env::current_dir()?));

    let (progress_tx, progress_rx) = mpsc::channel(64);
    let printer = tokio::spawn(print_progress(progress_rx));

    let workflow = NotesWorkflow::new(llm, prompts, config.generation.clone(), config.output.dir.clone())
        .with_progress(progress_tx);

    let result = workflow.generate(subject).await;

    // The workflow holds the only sender; dropping it ends the printer
    drop(workflow);
    let _ = printer.await;

    match result {
        Ok(report) => {
            println!();
            if report.failures.is_empty() {
                println!("{} Notes generated for all {} sections", "✓".green(), report.notes.len());
            } else {
                println!(
                    "{} Notes generated with {} of {} sections missing",
                    "⚠".yellow(),
                    report.failures.len(),
                    report.notes.len() + report.failures.len()
                );
                for failure in &report.failures {
                    println!("    {} {}: {}", "✗".red(), failure.heading, failure.message);
                }
            }
            println!("{} Saved to {}", "✓".green(), report.path.display());
            Ok(())
        }
        Err(e) => {
            println!();
            println!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}

/// Print workflow progress events as colored status lines
async fn print_progress(mut rx: mpsc::Receiver<ProgressEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            ProgressEvent::OutlineStarted => {
                println!("Analyzing subject and generating outline...");
            }
            ProgressEvent::OutlineReady { outline } => {
                println!("{} Outline generated", "✓".green());
                println!();
                println!("{}", outline);
                println!();
            }
            ProgressEvent::SectionStarted { index, total, heading } => {
                let label: String = heading.chars().take(60).collect();
                println!("[{}/{}] Generating notes for: {}", index + 1, total, label);
            }
            ProgressEvent::SectionCompleted { .. } => {}
            ProgressEvent::SectionFailed { heading, message, .. } => {
                let label: String = heading.chars().take(60).collect();
                println!("    {} {}: {}", "✗".red(), label, message);
            }
            ProgressEvent::DocumentSaved { .. } => {}
        }
    }
}

/// Launch the TUI
async fn cmd_tui(config: Config) -> Result<()> {
    config.validate()?;
    tui::run(config).await
}

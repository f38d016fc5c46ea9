//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Noter - LLM study note generator
#[derive(Parser)]
#[command(
    name = "noter",
    about = "Generate comprehensive study notes for any subject",
    version,
    after_help = "Logs are written to: ~/.local/share/noter/logs/noter.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate study notes for a subject (batch mode)
    Generate {
        /// The subject to generate notes for
        #[arg(value_name = "SUBJECT")]
        subject: String,

        /// Directory to write the notes file to (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Launch the interactive TUI
    Tui,
}

/// Get the path to the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("noter")
        .join("logs")
        .join("noter.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_subcommand() {
        let cli = Cli::parse_from(["noter", "generate", "Data Structures"]);
        match cli.command {
            Some(Command::Generate { subject, output_dir }) => {
                assert_eq!(subject, "Data Structures");
                assert!(output_dir.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_output_dir() {
        let cli = Cli::parse_from(["noter", "generate", "Rust", "--output-dir", "/tmp"]);
        match cli.command {
            Some(Command::Generate { output_dir, .. }) => {
                assert_eq!(output_dir, Some(PathBuf::from("/tmp")));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_log_path_ends_with_log_file() {
        let path = get_log_path();
        assert!(path.ends_with("noter/logs/noter.log"));
    }
}

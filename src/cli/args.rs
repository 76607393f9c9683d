//! Command line argument parsing
//!
//! This module handles CLI argument parsing with subcommands:
//! - `plan`: Compute an execution plan from a task list
//! - `optimize`: Reduce redundant dependencies in a task list
//! - `advise`: Compute a plan and report scheduling advisories
//! - `show-config`: Show configuration discovery information

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "taskweave")]
#[command(author = "Taskweave Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Plan agent task lists into validated, maximally parallel execution schedules"
)]
#[command(long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute an execution plan from a task list (JSON or TOML)
    Plan {
        /// Path to the task list file
        file: PathBuf,
        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
        /// Write the plan to a file instead of stdout (format by extension)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        /// Reduce redundant dependencies before planning
        #[arg(long = "optimize")]
        optimize: bool,
        /// Enable verbose output
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
        /// Pretty-print JSON output
        #[arg(long = "pretty")]
        pretty: bool,
    },
    /// Reduce redundant dependencies in a task list without planning
    Optimize {
        /// Path to the task list file
        file: PathBuf,
        /// Write the reduced list to a file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long = "pretty")]
        pretty: bool,
    },
    /// Compute a plan and report scheduling advisories
    Advise {
        /// Path to the task list file
        file: PathBuf,
        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
        /// Enable verbose output
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },
    /// Show configuration discovery information
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_subcommand_parsing() {
        let args = Args::try_parse_from([
            "taskweave", "plan", "tasks.json", "--optimize", "-v", "--pretty",
        ])
        .unwrap();

        match args.command {
            Commands::Plan {
                file,
                optimize,
                verbose,
                pretty,
                output,
                config,
            } => {
                assert_eq!(file, PathBuf::from("tasks.json"));
                assert!(optimize);
                assert!(verbose);
                assert!(pretty);
                assert!(output.is_none());
                assert!(config.is_none());
            }
            _ => panic!("expected plan subcommand"),
        }
    }

    #[test]
    fn test_optimize_subcommand_parsing() {
        let args = Args::try_parse_from([
            "taskweave", "optimize", "tasks.toml", "-o", "reduced.json",
        ])
        .unwrap();

        match args.command {
            Commands::Optimize { file, output, .. } => {
                assert_eq!(file, PathBuf::from("tasks.toml"));
                assert_eq!(output, Some(PathBuf::from("reduced.json")));
            }
            _ => panic!("expected optimize subcommand"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["taskweave"]).is_err());
    }
}

//! CLI command definitions.

use crate::styles::styles;
use clap::{Parser, Subcommand};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const VALIDATE_EXAMPLES: &str = "\
Examples:
  miniapp validate metadata.json                  Validate a metadata document
  miniapp validate metadata.json --strict         Treat warnings as errors
  miniapp validate metadata.json --json           JSON output for CI/CD
  miniapp validate metadata.json -q               Quiet mode (errors only)
  miniapp validate metadata.json -c chains.toml   Use a custom configuration";

const CHAINS_EXAMPLES: &str = "\
Examples:
  miniapp chains                                  List the default chains
  miniapp chains -c chains.toml                   List chains from a configuration file";

const CLI_EXAMPLES: &str = "\
Examples:
  miniapp validate metadata.json                  Validate a metadata document
  miniapp chains                                  List supported chains

Configuration:
  Set MINIAPP_CONFIG to a TOML file to replace the default allow-lists and limits.";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Mini-app metadata validator.
#[derive(Debug, Parser)]
#[command(name = "miniapp", author, version, styles=styles())]
#[command(about = "Validate mini-app action metadata", after_help = CLI_EXAMPLES)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a metadata document.
    #[command(after_help = VALIDATE_EXAMPLES)]
    Validate {
        /// Path to the metadata JSON file.
        path: String,

        /// Validator configuration file (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Show only errors, no details.
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the chains accepted by the validator.
    #[command(after_help = CHAINS_EXAMPLES)]
    Chains {
        /// Validator configuration file (TOML).
        #[arg(short, long)]
        config: Option<String>,
    },
}

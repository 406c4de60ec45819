//! `miniapp` is the metadata validation CLI.

use clap::Parser;
use colored::Colorize;
use miniapp_schema::handlers;
use miniapp_schema::{Cli, Command, SchemaError, SchemaResult};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    // Tracing stays silent unless RUST_LOG is set.
    init_tracing();

    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &SchemaError) {
    println!();
    match e {
        SchemaError::ValidationFailed(error) => {
            println!(
                "  {} {}",
                format!("error[{}]", error.code).bright_red().bold(),
                error.message
            );
            if !error.location.is_empty() {
                println!("    {}: {}", "at".dimmed(), error.location);
            }
            if let Some(help) = &error.help {
                println!();
                println!("    {}", "help:".bright_blue().bold());
                println!("      {}", help);
            }
        }
        SchemaError::InvalidConfig(message) => {
            println!("  {} {}", "error[config]".bright_red().bold(), message);
            println!();
            println!("    {}", "hint:".bright_blue().bold());
            println!(
                "      Check the file passed with --config or {}",
                "MINIAPP_CONFIG".bright_white()
            );
        }
        _ => {
            let msg = e.to_string();
            match msg.split_once(": ") {
                Some((prefix, rest)) if prefix.len() < 30 => {
                    println!(
                        "  {} {}",
                        format!("error[{}]", prefix.to_lowercase().replace(" error", ""))
                            .bright_red()
                            .bold(),
                        rest.dimmed()
                    );
                }
                _ => println!("  {} {}", "error".bright_red().bold(), msg),
            }
        }
    }
    println!();
}

fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> SchemaResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate {
            path,
            config,
            strict,
            json,
            quiet,
        } => handlers::validate_file(path, config, strict, json, quiet),
        Command::Chains { config } => handlers::list_chains(config),
    }
}

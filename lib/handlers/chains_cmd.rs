//! Chain listing command handler.

use super::resolve_config;
use crate::error::SchemaResult;
use colored::Colorize;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Print the chain allow-list.
pub fn list_chains(config: Option<String>) -> SchemaResult<()> {
    let config = resolve_config(config)?;

    println!("  {}\n", "Supported chains".bold());
    for chain in &config.chains {
        println!("    {} {}", "•".dimmed(), chain.bright_cyan());
    }
    println!();

    Ok(())
}

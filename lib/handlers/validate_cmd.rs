//! Metadata validation command handler.

use super::resolve_config;
use crate::error::SchemaResult;
use crate::schema::ValidatedMetadata;
use crate::validate::{ValidationError, ValidationResult, ValidationWarning, validate_metadata_str};
use anyhow::Context;
use colored::Colorize;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a metadata file.
pub fn validate_file(
    path: String,
    config: Option<String>,
    strict: bool,
    json_output: bool,
    quiet: bool,
) -> SchemaResult<()> {
    let config = resolve_config(config)?;
    let content =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;

    let result = validate_metadata_str(&content, &config);

    if json_output {
        output_json(&result, &path)?;
        return check_exit_status(&result, strict);
    }

    if quiet {
        output_quiet(&result, strict);
    } else {
        output_full(&result, strict, &path);
    }

    check_exit_status(&result, strict)
}

/// Output validation result as JSON.
fn output_json(result: &ValidationResult<ValidatedMetadata>, path: &str) -> SchemaResult<()> {
    let warnings = warnings_of(result);
    let output = serde_json::json!({
        "file": path,
        "valid": result.is_ok(),
        "strict_valid": result.is_ok() && warnings.is_empty(),
        "error": result.as_ref().err(),
        "warnings": warnings,
        "metadata": result.as_ref().ok(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Output validation result in quiet mode.
fn output_quiet(result: &ValidationResult<ValidatedMetadata>, strict: bool) {
    if let Err(error) = result {
        println!(
            "  {}: {}: {}",
            format!("error[{}]", error.code).bright_red(),
            error.location,
            error.message
        );
    }

    if strict {
        for warning in warnings_of(result) {
            println!(
                "  {}: {}: {}",
                format!("error[{}]", warning.code).bright_red(),
                warning.location,
                warning.message
            );
        }
    }
}

/// Output validation result in full format.
fn output_full(result: &ValidationResult<ValidatedMetadata>, strict: bool, path: &str) {
    println!("  Validating {}\n", path.bold());

    if let Err(error) = result {
        print_error_issue(error);
    }

    let warnings = warnings_of(result);
    for warning in warnings {
        print_warning_issue(warning, strict);
    }

    // Summary line
    let warning_count = warnings.len();
    match result {
        Err(_) => {
            let summary = if warning_count > 0 {
                format!(
                    "1 error, {} {}",
                    warning_count,
                    if warning_count == 1 { "warning" } else { "warnings" }
                )
            } else {
                "1 error".to_string()
            };
            println!("  {} {}", "✗".bright_red(), summary);
        }
        Ok(_) if strict && warning_count > 0 => {
            println!(
                "  {} {} (strict mode)",
                "✗".bright_red(),
                if warning_count == 1 {
                    "1 error".to_string()
                } else {
                    format!("{} errors", warning_count)
                }
            );
        }
        Ok(metadata) if warning_count > 0 => {
            println!(
                "  {} valid, {} {} ({} {})",
                "✓".bright_green(),
                metadata.actions.len(),
                if metadata.actions.len() == 1 { "action" } else { "actions" },
                warning_count,
                if warning_count == 1 { "warning" } else { "warnings" }
            );
        }
        Ok(metadata) => {
            println!(
                "  {} valid, {} {}",
                "✓".bright_green(),
                metadata.actions.len(),
                if metadata.actions.len() == 1 { "action" } else { "actions" }
            );
        }
    }
}

fn print_error_issue(error: &ValidationError) {
    let label = format!("error[{}]", error.code).bright_red().bold();
    println!("  {}: → {}", label, display_location(&error.location).bold());

    if let Some(help) = &error.help {
        println!("      {} {}", "├─".dimmed(), error.message.dimmed());
        println!(
            "      {} {}: {}",
            "└─".dimmed(),
            "help".bright_green().dimmed(),
            help.dimmed()
        );
    } else {
        println!("      {} {}", "└─".dimmed(), error.message.dimmed());
    }
    println!();
}

fn print_warning_issue(warning: &ValidationWarning, strict: bool) {
    let label = if strict {
        format!("error[{}]", warning.code).bright_red().bold()
    } else {
        format!("warning[{}]", warning.code).bright_yellow().bold()
    };
    println!("  {}: → {}", label, display_location(&warning.location).bold());
    println!("      {} {}", "└─".dimmed(), warning.message.dimmed());
    println!();
}

fn display_location(location: &str) -> &str {
    if location.is_empty() { "(document)" } else { location }
}

fn warnings_of(result: &ValidationResult<ValidatedMetadata>) -> &[ValidationWarning] {
    result.as_ref().map(|m| m.warnings.as_slice()).unwrap_or(&[])
}

/// Check if we should exit with error status.
fn check_exit_status(result: &ValidationResult<ValidatedMetadata>, strict: bool) -> SchemaResult<()> {
    if result.is_err() || (strict && !warnings_of(result).is_empty()) {
        std::process::exit(1);
    }
    Ok(())
}

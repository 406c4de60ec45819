//! CLI command handlers.

mod chains_cmd;
mod validate_cmd;

use crate::config::ValidatorConfig;
use crate::constants::MINIAPP_CONFIG_ENV;
use crate::error::SchemaResult;
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use chains_cmd::list_chains;
pub use validate_cmd::validate_file;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolve the validator configuration.
///
/// An explicit path wins over `MINIAPP_CONFIG`; without either the defaults apply.
pub fn resolve_config(path: Option<String>) -> SchemaResult<ValidatorConfig> {
    let path = path
        .or_else(|| std::env::var(MINIAPP_CONFIG_ENV).ok().filter(|s| !s.is_empty()))
        .map(PathBuf::from);

    match path {
        Some(path) => ValidatorConfig::load(&path),
        None => Ok(ValidatorConfig::default()),
    }
}

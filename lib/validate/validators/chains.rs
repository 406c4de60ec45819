//! Chain context validation.

use serde_json::Value;

use super::super::codes::ErrorCode;
use super::super::result::{ValidationError, ValidationResult};
use super::fields::{as_object, missing_field, optional_str, required_str};
use crate::config::ValidatorConfig;
use crate::schema::ChainContext;
use crate::suggest::suggest;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a required `chains` object.
///
/// Locations are relative to the action; errors point at `chains.source` etc.
pub fn validate_chains(
    raw: Option<&Value>,
    config: &ValidatorConfig,
) -> ValidationResult<ChainContext> {
    let raw = raw.filter(|v| !v.is_null()).ok_or_else(|| missing_field("chains"))?;
    let obj = as_object(raw, "`chains`").map_err(|e| e.within("chains"))?;

    let source = required_str(obj, "source").map_err(|e| e.within("chains"))?;
    check_chain(source, "chains.source", config)?;

    let destination = optional_str(obj, "destination").map_err(|e| e.within("chains"))?;
    if let Some(destination) = destination {
        check_chain(destination, "chains.destination", config)?;
    }

    Ok(ChainContext {
        source: source.to_string(),
        destination: destination.map(str::to_string),
    })
}

/// Validate an optional `chains` object.
pub fn validate_optional_chains(
    raw: Option<&Value>,
    config: &ValidatorConfig,
) -> ValidationResult<Option<ChainContext>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(_) => validate_chains(raw, config).map(Some),
    }
}

fn check_chain(chain: &str, location: &str, config: &ValidatorConfig) -> ValidationResult<()> {
    if config.is_chain_allowed(chain) {
        return Ok(());
    }

    Err(ValidationError::new(
        ErrorCode::InvalidChain,
        location,
        format!("`{}` is not a supported chain", chain),
    )
    .with_help(
        suggest(chain, &config.chains)
            .unwrap_or_else(|| format!("supported chains: {}", config.chains.join(", "))),
    ))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_chains() {
        let config = ValidatorConfig::default();
        let chains = validate_chains(
            Some(&json!({ "source": "avalanche", "destination": "celo" })),
            &config,
        )
        .unwrap();
        assert_eq!(chains.source, "avalanche");
        assert_eq!(chains.destination.as_deref(), Some("celo"));
    }

    #[test]
    fn test_invalid_chain() {
        let config = ValidatorConfig::default();
        let err = validate_chains(Some(&json!({ "source": "not-a-chain" })), &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChain);
        assert_eq!(err.location, "chains.source");

        let err = validate_chains(Some(&json!({ "source": "avalanch" })), &config).unwrap_err();
        assert_eq!(err.help.as_deref(), Some("Did you mean `avalanche`?"));
    }

    #[test]
    fn test_missing_chains() {
        let config = ValidatorConfig::default();
        assert_eq!(
            validate_chains(None, &config).unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
        assert_eq!(
            validate_chains(Some(&json!({})), &config).unwrap_err().location,
            "chains.source"
        );
        assert!(validate_optional_chains(None, &config).unwrap().is_none());
    }

    #[test]
    fn test_custom_allow_list() {
        let config = ValidatorConfig::default().with_chains(["devnet"]);
        assert!(validate_chains(Some(&json!({ "source": "devnet" })), &config).is_ok());
        assert!(validate_chains(Some(&json!({ "source": "avalanche" })), &config).is_err());
    }
}

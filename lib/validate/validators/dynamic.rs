//! Dynamic (remotely resolved) action validation.

use super::super::codes::ErrorCode;
use super::super::result::{ValidationContext, ValidationError, ValidationResult};
use super::chains::validate_chains;
use super::fields::{Object, optional_array, optional_str, required_label, required_str};
use super::params::validate_parameter_list;
use super::urls::resolve_path;
use crate::schema::{ActionKind, DynamicAction};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a dynamic action. Locations are relative to the action.
///
/// Relative paths are resolved against the document `baseUrl` carried by the
/// context.
pub fn validate_dynamic(
    obj: &Object,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<DynamicAction> {
    let config = ctx.config;
    let label = required_label(obj, "label", config.max_label_length)?;
    let description = optional_str(obj, "description")?;

    if let Some(tag) = optional_str(obj, "type")?
        && tag != ActionKind::Dynamic.as_str()
    {
        return Err(ValidationError::new(
            ErrorCode::InvalidStructure,
            "type",
            format!("dynamic action `type` must be `dynamic`, got `{}`", tag),
        ));
    }

    let path = required_str(obj, "path")?;
    let resolved = resolve_path(path, ctx.base_url, config).map_err(|e| e.within("path"))?;

    let chains = validate_chains(obj.get("chains"), config)?;

    let params = match optional_array(obj, "params")? {
        Some(items) => validate_parameter_list(items, config, false)?,
        None => Vec::new(),
    };

    tracing::debug!(path = %path, resolved = %resolved, "resolved dynamic action path");

    Ok(DynamicAction {
        label: label.to_string(),
        description: description.map(str::to_string),
        path: path.to_string(),
        chains,
        params,
        resolved_url: resolved.to_string(),
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use serde_json::{Value, json};
    use url::Url;

    fn validate(raw: Value, base_url: Option<&Url>) -> ValidationResult<DynamicAction> {
        let config = ValidatorConfig::default();
        let mut ctx = ValidationContext::new(&config, base_url);
        validate_dynamic(raw.as_object().unwrap(), &mut ctx)
    }

    fn swap() -> Value {
        json!({
            "type": "dynamic",
            "label": "Swap",
            "path": "/swap",
            "chains": { "source": "avalanche" },
            "params": [{ "name": "amount", "label": "Amount", "type": "number", "min": 0 }]
        })
    }

    #[test]
    fn test_relative_path_requires_base_url() {
        let err = validate(swap(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingBaseUrl);
        assert_eq!(err.location, "path");

        let base = Url::parse("https://api.example.com").unwrap();
        let action = validate(swap(), Some(&base)).unwrap();
        assert_eq!(action.resolved_url, "https://api.example.com/swap");
        assert_eq!(action.params.len(), 1);
    }

    #[test]
    fn test_absolute_path() {
        let mut raw = swap();
        raw["path"] = json!("https://resolver.example.com/quote?pair=avax");
        let action = validate(raw, None).unwrap();
        assert_eq!(action.resolved_url, "https://resolver.example.com/quote?pair=avax");
    }

    #[test]
    fn test_invalid_path_format() {
        let mut raw = swap();
        raw["path"] = json!("swap");
        assert_eq!(validate(raw, None).unwrap_err().code, ErrorCode::InvalidPathFormat);
    }

    #[test]
    fn test_wrong_type_tag() {
        let mut raw = swap();
        raw["type"] = json!("form");
        let err = validate(raw, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStructure);
        assert_eq!(err.location, "type");
    }

    #[test]
    fn test_chains_required() {
        let mut raw = swap();
        raw.as_object_mut().unwrap().remove("chains");
        raw["path"] = json!("https://resolver.example.com");
        let err = validate(raw, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.location, "chains");
    }

    #[test]
    fn test_fixed_param_requires_value() {
        let mut raw = swap();
        raw["params"] = json!([{ "name": "pair", "label": "Pair", "type": "text", "fixed": true }]);
        let base = Url::parse("https://api.example.com").unwrap();
        let err = validate(raw.clone(), Some(&base)).unwrap_err();
        assert_eq!(err.code, ErrorCode::FixedValueMissing);
        assert_eq!(err.location, "params[0].value");

        raw["params"][0]["value"] = json!("avax-usdc");
        assert!(validate(raw, Some(&base)).is_ok());
    }
}

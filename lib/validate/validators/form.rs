//! Form (HTTP submission) action validation.

use super::super::result::{ValidationContext, ValidationResult};
use super::chains::validate_optional_chains;
use super::fields::{Object, optional_array, optional_str, required_label, required_str};
use super::params::validate_parameter_list;
use super::urls::resolve_path;
use crate::schema::FormAction;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a form action. Locations are relative to the action.
pub fn validate_form(obj: &Object, ctx: &mut ValidationContext<'_>) -> ValidationResult<FormAction> {
    let config = ctx.config;
    let label = required_label(obj, "label", config.max_label_length)?;
    let description = optional_str(obj, "description")?;

    let endpoint = required_str(obj, "endpoint")?;
    let resolved = resolve_path(endpoint, ctx.base_url, config).map_err(|e| e.within("endpoint"))?;

    let chains = validate_optional_chains(obj.get("chains"), config)?;

    let params = match optional_array(obj, "params")? {
        Some(items) => validate_parameter_list(items, config, true)?,
        None => Vec::new(),
    };

    tracing::debug!(endpoint = %resolved, params = params.len(), "validated form");

    Ok(FormAction {
        label: label.to_string(),
        description: description.map(str::to_string),
        endpoint: endpoint.to_string(),
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
    use crate::validate::ErrorCode;
    use serde_json::{Value, json};
    use url::Url;

    fn validate(raw: Value, base_url: Option<&Url>) -> ValidationResult<FormAction> {
        let config = ValidatorConfig::default();
        let mut ctx = ValidationContext::new(&config, base_url);
        validate_form(raw.as_object().unwrap(), &mut ctx)
    }

    #[test]
    fn test_absolute_endpoint() {
        let form = validate(
            json!({
                "label": "Sign up",
                "endpoint": "https://example.com/signup",
                "params": [
                    { "name": "email", "label": "Email", "type": "email", "value": "a@b.co" },
                    {
                        "name": "plan",
                        "label": "Plan",
                        "type": "radio",
                        "options": [{ "label": "Free", "value": "free" }, { "label": "Pro", "value": "pro" }]
                    }
                ]
            }),
            None,
        )
        .unwrap();
        assert_eq!(form.resolved_url, "https://example.com/signup");
        assert_eq!(form.params.len(), 2);
        assert!(form.chains.is_none());
    }

    #[test]
    fn test_relative_endpoint() {
        let raw = json!({ "label": "Send", "endpoint": "/submit" });
        let base = Url::parse("https://api.example.com").unwrap();

        let form = validate(raw.clone(), Some(&base)).unwrap();
        assert_eq!(form.resolved_url, "https://api.example.com/submit");

        let err = validate(raw, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingBaseUrl);
        assert_eq!(err.location, "endpoint");
    }

    #[test]
    fn test_disallowed_endpoint() {
        let err = validate(json!({ "label": "Send", "endpoint": "http://" }), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUrl);

        let err = validate(json!({ "label": "Send", "endpoint": "submit" }), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPathFormat);
    }

    #[test]
    fn test_unknown_parameter_type() {
        let err = validate(
            json!({
                "label": "Send",
                "endpoint": "https://example.com",
                "params": [{ "name": "n", "label": "N", "type": "uint256" }]
            }),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownParameterType);
        assert_eq!(err.location, "params[0].type");
    }

    #[test]
    fn test_default_value_checks() {
        let err = validate(
            json!({
                "label": "Send",
                "endpoint": "https://example.com",
                "params": [{ "name": "when", "label": "When", "type": "datetime", "value": "soon" }]
            }),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameterValue);
        assert_eq!(err.location, "params[0].value");
    }

    #[test]
    fn test_fixed_param_requires_value() {
        let err = validate(
            json!({
                "label": "Join",
                "endpoint": "https://example.com/join",
                "params": [
                    { "name": "email", "label": "Email", "type": "email" },
                    { "name": "n", "label": "N", "type": "text", "fixed": true }
                ]
            }),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::FixedValueMissing);
        assert_eq!(err.location, "params[1].value");
    }
}

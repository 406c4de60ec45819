//! Core validation entry point and action dispatch.

use serde_json::Value;

use super::super::codes::ErrorCode;
use super::super::result::{ValidationContext, ValidationError, ValidationResult};
use super::classify::classify_action;
use super::contract::validate_contract_call;
use super::dynamic::validate_dynamic;
use super::fields::{Object, as_object, check_length, optional_str, required_str};
use super::flow::validate_flow;
use super::form::validate_form;
use super::transfer::validate_transfer;
use super::urls::validate_url;
use crate::config::ValidatorConfig;
use crate::schema::{ActionKind, ValidatedAction, ValidatedMetadata};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validates metadata documents against a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct MetadataValidator {
    config: ValidatorConfig,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl MetadataValidator {
    /// Create a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a parsed document.
    pub fn validate(&self, raw: &Value) -> ValidationResult<ValidatedMetadata> {
        validate_metadata(raw, &self.config)
    }

    /// Parse and validate a JSON document.
    pub fn validate_str(&self, content: &str) -> ValidationResult<ValidatedMetadata> {
        validate_metadata_str(content, &self.config)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse and validate a JSON metadata document.
pub fn validate_metadata_str(
    content: &str,
    config: &ValidatorConfig,
) -> ValidationResult<ValidatedMetadata> {
    let raw: Value = serde_json::from_str(content).map_err(|e| {
        ValidationError::new(ErrorCode::InvalidJson, "", format!("invalid JSON: {}", e))
            .with_help("check JSON syntax")
    })?;
    validate_metadata(&raw, config)
}

/// Validate a metadata document.
///
/// The envelope is checked first, then every action in order. The first
/// failure aborts validation; no partial result is returned.
pub fn validate_metadata(
    raw: &Value,
    config: &ValidatorConfig,
) -> ValidationResult<ValidatedMetadata> {
    // 1. Document must be an object
    let obj = raw.as_object().ok_or_else(|| {
        ValidationError::new(
            ErrorCode::InvalidEnvelope,
            "",
            "metadata document must be a JSON object",
        )
    })?;

    // 2. Envelope fields
    let url = envelope_url(obj, "url", config)?;
    let icon = envelope_url(obj, "icon", config)?;

    let title = envelope_str(obj, "title")?;
    check_length(title, "title", config.max_title_length, ErrorCode::InvalidEnvelope)?;

    let description = envelope_str(obj, "description")?;
    check_length(
        description,
        "description",
        config.max_description_length,
        ErrorCode::InvalidEnvelope,
    )?;

    let base = optional_str(obj, "baseUrl").map_err(into_envelope_error)?;
    let base_url = match base {
        Some(base) => Some(validate_url(base, config).map_err(|e| e.within("baseUrl"))?),
        None => None,
    };

    // 3. Action count
    let items = match obj.get("actions") {
        Some(Value::Array(items)) => items,
        Some(other) if !other.is_null() => {
            return Err(ValidationError::new(
                ErrorCode::InvalidEnvelope,
                "actions",
                "`actions` must be an array",
            ));
        }
        _ => {
            return Err(ValidationError::new(
                ErrorCode::InvalidEnvelope,
                "actions",
                "field `actions` is required",
            ));
        }
    };

    if items.is_empty() || items.len() > config.max_actions {
        return Err(ValidationError::new(
            ErrorCode::ActionCountOutOfBounds,
            "actions",
            format!(
                "expected 1 to {} actions, found {}",
                config.max_actions,
                items.len()
            ),
        ));
    }

    // 4. Actions
    let mut ctx = ValidationContext::new(config, base_url.as_ref());
    let mut actions = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let action = ctx.scoped(&format!("actions[{}]", i), |ctx| validate_action(item, ctx))?;
        actions.push(action);
    }

    let warnings = ctx.into_warnings();
    tracing::debug!(
        actions = actions.len(),
        warnings = warnings.len(),
        "validated metadata"
    );

    Ok(ValidatedMetadata {
        url: url.to_string(),
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        base_url: base.map(str::to_string),
        actions,
        warnings,
    })
}

/// Classify one action and run the validator for its kind.
///
/// Locations are relative to the action.
pub fn validate_action(
    raw: &Value,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<ValidatedAction> {
    let obj: &Object = as_object(raw, "action")?;
    let kind = classify_action(obj)?;
    tracing::debug!(kind = %kind, "dispatching action");

    Ok(match kind {
        ActionKind::ContractCall => ValidatedAction::ContractCall(validate_contract_call(obj, ctx)?),
        ActionKind::Transfer => ValidatedAction::Transfer(validate_transfer(obj, ctx)?),
        ActionKind::Form => ValidatedAction::Form(validate_form(obj, ctx)?),
        ActionKind::Dynamic => ValidatedAction::Dynamic(validate_dynamic(obj, ctx)?),
        ActionKind::Flow => ValidatedAction::Flow(validate_flow(obj, ctx)?),
    })
}

fn envelope_str<'a>(obj: &'a Object, field: &str) -> ValidationResult<&'a str> {
    required_str(obj, field).map_err(into_envelope_error)
}

fn envelope_url<'a>(
    obj: &'a Object,
    field: &str,
    config: &ValidatorConfig,
) -> ValidationResult<&'a str> {
    let value = envelope_str(obj, field)?;
    validate_url(value, config).map_err(|e| e.within(field))?;
    Ok(value)
}

/// Report a missing or mistyped envelope field as an envelope error.
fn into_envelope_error(mut error: ValidationError) -> ValidationError {
    error.code = ErrorCode::InvalidEnvelope;
    error
}

//! Transfer action validation.

use serde_json::{Number, Value};

use super::super::codes::ErrorCode;
use super::super::result::{ValidationContext, ValidationError, ValidationResult};
use super::chains::validate_chains;
use super::fields::{
    Object, get_present, has, optional_number, optional_object, optional_str,
    required_label, required_str,
};
use super::params::validate_options;
use crate::abi::is_valid_address;
use crate::config::ValidatorConfig;
use crate::schema::{
    AmountConfig, AmountInputType, RecipientConfig, RecipientInputType, SelectOption,
    TransferAction,
};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a transfer action. Locations are relative to the action.
///
/// The recipient is a fixed `to` address, a configurable `recipient`, or
/// neither; the amount is a fixed `amount`, a configurable `amountConfig`, or
/// neither. Declaring both forms of either is rejected.
pub fn validate_transfer(
    obj: &Object,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<TransferAction> {
    let config = ctx.config;
    let label = required_label(obj, "label", config.max_label_length)?;
    let description = optional_str(obj, "description")?;
    let chains = validate_chains(obj.get("chains"), config)?;

    if has(obj, "to") && has(obj, "recipient") {
        return Err(ValidationError::new(
            ErrorCode::ConflictingFields,
            "recipient",
            "declare either `to` or `recipient`, not both",
        ));
    }

    let to = match optional_str(obj, "to")? {
        Some(to) => {
            check_recipient(to, config).map_err(|e| e.within("to"))?;
            Some(to.to_string())
        }
        None => None,
    };

    let recipient = optional_object(obj, "recipient")?
        .map(|r| validate_recipient_config(r, config).map_err(|e| e.within("recipient")))
        .transpose()?;

    if has(obj, "amount") && has(obj, "amountConfig") {
        return Err(ValidationError::new(
            ErrorCode::ConflictingFields,
            "amountConfig",
            "declare either `amount` or `amountConfig`, not both",
        ));
    }

    let amount = optional_number(obj, "amount")?.cloned();
    if let Some(amount) = &amount {
        check_positive(amount).map_err(|e| e.within("amount"))?;
    }

    let amount_config = optional_object(obj, "amountConfig")?
        .map(|a| validate_amount_config(a).map_err(|e| e.within("amountConfig")))
        .transpose()?;

    tracing::debug!(
        fixed_recipient = to.is_some(),
        fixed_amount = amount.is_some(),
        "validated transfer"
    );

    Ok(TransferAction {
        label: label.to_string(),
        description: description.map(str::to_string),
        chains,
        to,
        recipient,
        amount,
        amount_config,
    })
}

fn validate_recipient_config(
    obj: &Object,
    config: &ValidatorConfig,
) -> ValidationResult<RecipientConfig> {
    let input_type = match required_str(obj, "inputType")? {
        "select" => RecipientInputType::Select,
        "input" => RecipientInputType::Input,
        other => {
            return Err(ValidationError::new(
                ErrorCode::InvalidStructure,
                "inputType",
                format!("recipient `inputType` must be `select` or `input`, got `{}`", other),
            ));
        }
    };

    let options = match input_type {
        RecipientInputType::Select => {
            let options = validate_options(obj.get("options"))?;
            for (i, option) in options.iter().enumerate() {
                let location = format!("options[{}].value", i);
                let address = option.value.as_str().ok_or_else(|| {
                    ValidationError::new(
                        ErrorCode::InvalidAddress,
                        location.as_str(),
                        format!("recipient option value {} is not a string", option.value),
                    )
                })?;
                check_recipient(address, config).map_err(|e| e.within(&location))?;
            }
            options
        }
        RecipientInputType::Input => Vec::new(),
    };

    Ok(RecipientConfig {
        input_type,
        label: optional_str(obj, "label")?.map(str::to_string),
        description: optional_str(obj, "description")?.map(str::to_string),
        options,
    })
}

fn validate_amount_config(obj: &Object) -> ValidationResult<AmountConfig> {
    let input_type = match required_str(obj, "inputType")? {
        "select" => AmountInputType::Select,
        "radio" => AmountInputType::Radio,
        "input" => AmountInputType::Input,
        other => {
            return Err(ValidationError::new(
                ErrorCode::InvalidStructure,
                "inputType",
                format!(
                    "amount `inputType` must be `select`, `radio`, or `input`, got `{}`",
                    other
                ),
            ));
        }
    };

    let options: Vec<SelectOption> = match input_type {
        AmountInputType::Select | AmountInputType::Radio => {
            let options = validate_options(obj.get("options"))?;
            for (i, option) in options.iter().enumerate() {
                numeric_amount(&option.value)
                    .map_err(|e| e.within(&format!("options[{}].value", i)))?;
            }
            options
        }
        AmountInputType::Input => Vec::new(),
    };

    let value = get_present(obj, "value")
        .map(|v| numeric_amount(v).map_err(|e| e.within("value")))
        .transpose()?;

    Ok(AmountConfig {
        input_type,
        label: optional_str(obj, "label")?.map(str::to_string),
        description: optional_str(obj, "description")?.map(str::to_string),
        options,
        value,
    })
}

/// Check a recipient address, leniently unless strict recipients are configured.
fn check_recipient(address: &str, config: &ValidatorConfig) -> ValidationResult<()> {
    let ok = if config.strict_recipient_address {
        is_valid_address(address)
    } else {
        address.len() > 2 && address.starts_with("0x")
    };

    if ok {
        return Ok(());
    }

    Err(ValidationError::new(
        ErrorCode::InvalidAddress,
        "",
        format!("`{}` is not a valid recipient address", address),
    ))
}

fn numeric_amount(value: &Value) -> ValidationResult<Number> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        other => Err(ValidationError::new(
            ErrorCode::InvalidAmount,
            "",
            format!("amount {} is not numeric", other),
        )),
    }
}

fn check_positive(amount: &Number) -> ValidationResult<()> {
    if amount.as_f64().is_some_and(|a| a > 0.0) {
        return Ok(());
    }
    Err(ValidationError::new(
        ErrorCode::InvalidAmount,
        "",
        format!("amount must be positive, got {}", amount),
    ))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate_with(raw: Value, config: &ValidatorConfig) -> ValidationResult<TransferAction> {
        let mut ctx = ValidationContext::new(config, None);
        validate_transfer(raw.as_object().unwrap(), &mut ctx)
    }

    fn validate(raw: Value) -> ValidationResult<TransferAction> {
        validate_with(raw, &ValidatorConfig::default())
    }

    #[test]
    fn test_fixed_transfer() {
        let action = validate(json!({
            "label": "Tip",
            "to": "0xRecipient",
            "amount": 0.01,
            "chains": { "source": "avalanche" }
        }))
        .unwrap();
        assert_eq!(action.to.as_deref(), Some("0xRecipient"));
        assert_eq!(action.amount.unwrap().as_f64(), Some(0.01));
    }

    #[test]
    fn test_invalid_chain() {
        let err = validate(json!({
            "label": "Tip",
            "to": "0xRecipient",
            "amount": 0.01,
            "chains": { "source": "not-a-chain" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChain);
        assert_eq!(err.location, "chains.source");
    }

    #[test]
    fn test_recipient_and_amount_may_be_absent() {
        assert!(validate(json!({ "label": "Tip", "chains": { "source": "celo" } })).is_ok());
    }

    #[test]
    fn test_strict_recipient() {
        let config = ValidatorConfig {
            strict_recipient_address: true,
            ..ValidatorConfig::default()
        };
        let raw = json!({ "label": "Tip", "to": "0xRecipient", "chains": { "source": "celo" } });
        let err = validate_with(raw, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAddress);
        assert_eq!(err.location, "to");

        assert_eq!(
            validate(json!({ "label": "Tip", "to": "alice", "chains": { "source": "celo" } }))
                .unwrap_err()
                .code,
            ErrorCode::InvalidAddress
        );
    }

    #[test]
    fn test_conflicting_fields() {
        let err = validate(json!({
            "label": "Tip",
            "to": "0xRecipient",
            "recipient": { "inputType": "input" },
            "chains": { "source": "celo" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConflictingFields);

        let err = validate(json!({
            "label": "Tip",
            "amount": 1,
            "amountConfig": { "inputType": "input" },
            "chains": { "source": "celo" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConflictingFields);
    }

    #[test]
    fn test_recipient_config() {
        let action = validate(json!({
            "label": "Pay",
            "recipient": {
                "inputType": "select",
                "label": "Who",
                "options": [
                    { "label": "Alice", "value": "0xAlice" },
                    { "label": "Bob", "value": "0xBob" }
                ]
            },
            "chains": { "source": "fuji" }
        }))
        .unwrap();
        assert_eq!(action.recipient.unwrap().options.len(), 2);

        let err = validate(json!({
            "label": "Pay",
            "recipient": { "inputType": "select", "options": [] },
            "chains": { "source": "fuji" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyOptionSet);
        assert_eq!(err.location, "recipient.options");

        let err = validate(json!({
            "label": "Pay",
            "recipient": { "inputType": "dropdown" },
            "chains": { "source": "fuji" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStructure);
    }

    #[test]
    fn test_amount_config() {
        let action = validate(json!({
            "label": "Pay",
            "amountConfig": {
                "inputType": "radio",
                "options": [{ "label": "Small", "value": 1 }, { "label": "Large", "value": 10 }],
                "value": 1
            },
            "chains": { "source": "fuji" }
        }))
        .unwrap();
        assert_eq!(action.amount_config.unwrap().input_type, AmountInputType::Radio);

        let err = validate(json!({
            "label": "Pay",
            "amountConfig": { "inputType": "select", "options": [{ "label": "One", "value": "1" }] },
            "chains": { "source": "fuji" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.location, "amountConfig.options[0].value");

        let err = validate(json!({
            "label": "Pay",
            "amountConfig": { "inputType": "input", "value": "lots" },
            "chains": { "source": "fuji" }
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.location, "amountConfig.value");
    }

    #[test]
    fn test_non_positive_amount() {
        let err = validate(json!({ "label": "Tip", "amount": -1, "chains": { "source": "celo" } }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.location, "amount");
    }
}

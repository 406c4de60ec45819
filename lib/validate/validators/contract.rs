//! Contract-call action validation.
//!
//! A contract call moves through three stages, each consuming the previous
//! one: the structure is checked (address, interface, function, chains), then
//! declared parameters are bound positionally to the function inputs, and
//! finally the attached amount is reconciled with the function mutability.

use serde_json::{Number, Value};

use super::super::codes::{ErrorCode, WarningCode};
use super::super::result::{ValidationContext, ValidationError, ValidationResult};
use super::chains::validate_chains;
use super::compat::{infer_ui_type_from_abi_type, is_ui_type_compatible, is_value_compatible};
use super::fields::{
    Object, check_length, optional_array, optional_number, optional_str, required_array,
    required_label, required_str, wrong_type,
};
use super::params::validate_parameter;
use crate::abi::{AbiFunction, AbiParam, AbiType, Interface, is_valid_address};
use crate::config::PayableAmountPolicy;
use crate::constants::AMOUNT_PARAM_NAME;
use crate::schema::{
    ChainContext, ContractCallAction, Parameter, ParameterBase, StandardParameter,
};
use crate::suggest::suggest;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A contract call whose structure has been checked.
struct StructureChecked {
    label: String,
    description: Option<String>,
    address: String,
    abi: Vec<Value>,
    function: AbiFunction,
    chains: ChainContext,
}

/// A contract call whose parameters have been bound to the function inputs.
struct ParametersChecked {
    structure: StructureChecked,
    params: Vec<Parameter>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a contract-call action. Locations are relative to the action.
pub fn validate_contract_call(
    obj: &Object,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<ContractCallAction> {
    let structure = check_structure(obj, ctx)?;
    let checked = check_parameters(obj, structure, ctx)?;
    finish(obj, checked, ctx)
}

fn check_structure(obj: &Object, ctx: &ValidationContext<'_>) -> ValidationResult<StructureChecked> {
    let label = required_label(obj, "label", ctx.config.max_label_length)?;
    let description = optional_str(obj, "description")?;

    let address = required_str(obj, "address")?;
    if !is_valid_address(address) {
        return Err(ValidationError::new(
            ErrorCode::InvalidAddress,
            "address",
            format!("`{}` is not a valid contract address", address),
        )
        .with_help("expected 0x followed by 40 hex digits with a valid checksum"));
    }

    let abi = required_array(obj, "abi")?;
    if abi.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::InvalidAbi,
            "abi",
            "interface description must not be empty",
        ));
    }

    let interface = Interface::from_entries(abi)
        .map_err(|e| ValidationError::new(ErrorCode::InvalidAbi, "abi", e.to_string()))?;
    if interface.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::InvalidAbi,
            "abi",
            "interface description declares no functions",
        ));
    }

    let function_name = required_str(obj, "functionName")?;
    let function = interface.function(function_name).cloned().ok_or_else(|| {
        let names = interface.function_names();
        ValidationError::new(
            ErrorCode::FunctionNotFound,
            "functionName",
            format!("function `{}` is not in the interface description", function_name),
        )
        .with_optional_help(suggest(function_name, &names))
    })?;

    let chains = validate_chains(obj.get("chains"), ctx.config)?;

    Ok(StructureChecked {
        label: label.to_string(),
        description: description.map(str::to_string),
        address: address.to_string(),
        abi: abi.clone(),
        function,
        chains,
    })
}

fn check_parameters(
    obj: &Object,
    structure: StructureChecked,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<ParametersChecked> {
    let inputs = &structure.function.inputs;

    let params = match optional_array(obj, "params")? {
        Some(declared) => {
            if declared.len() != inputs.len() {
                return Err(ValidationError::new(
                    ErrorCode::ParameterCountMismatch,
                    "params",
                    format!(
                        "`{}` takes {} parameter(s) but {} are declared",
                        structure.function.name,
                        inputs.len(),
                        declared.len()
                    ),
                ));
            }

            let mut params = Vec::with_capacity(declared.len());
            for (i, (raw, input)) in declared.iter().zip(inputs).enumerate() {
                let param = ctx.scoped(&format!("params[{}]", i), |ctx| {
                    bind_parameter(raw, input, ctx)
                })?;
                params.push(param);
            }
            params
        }
        None => synthesize_parameters(obj, inputs, ctx)?,
    };

    Ok(ParametersChecked { structure, params })
}

/// Validate one declared parameter and bind it to the input at the same position.
fn bind_parameter(
    raw: &Value,
    input: &AbiParam,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<Parameter> {
    let param = validate_parameter(raw, ctx.config)?;

    if param.name() != input.name {
        return Err(ValidationError::new(
            ErrorCode::ParameterOrderMismatch,
            "name",
            format!(
                "parameter `{}` is declared where the interface expects `{}`",
                param.name(),
                input.name
            ),
        )
        .with_help("parameters bind to the function inputs by position"));
    }

    let abi_type = input.abi_type();
    if abi_type.is_unknown() {
        ctx.warn(
            WarningCode::UnrecognizedAbiType,
            "type",
            format!(
                "binary type `{}` is not recognized; its values are not checked",
                input.param_type
            ),
        );
    }

    match &param {
        Parameter::Standard(p) => {
            if !is_ui_type_compatible(&p.base.input_type, &abi_type) {
                return Err(ValidationError::new(
                    ErrorCode::TypeIncompatibility,
                    "type",
                    format!(
                        "input kind `{}` cannot be bound to `{}`",
                        p.base.input_type, input.param_type
                    ),
                )
                .with_help(format!(
                    "use `{}` for `{}` inputs",
                    infer_ui_type_from_abi_type(&abi_type),
                    input.param_type
                )));
            }
        }
        Parameter::Selection(p) => {
            for (j, option) in p.options.iter().enumerate() {
                if !is_value_compatible(&option.value, &abi_type) {
                    return Err(ValidationError::new(
                        ErrorCode::TypeIncompatibility,
                        format!("options[{}].value", j),
                        format!(
                            "option value {} is not a valid `{}`",
                            option.value, input.param_type
                        ),
                    ));
                }
            }
        }
    }

    if let Some(value) = param.value()
        && !is_value_compatible(value, &abi_type)
    {
        return Err(ValidationError::new(
            ErrorCode::TypeIncompatibility,
            "value",
            format!("value {} is not a valid `{}`", value, input.param_type),
        ));
    }

    Ok(param)
}

/// Build parameters from the function inputs when none are declared.
///
/// Labels come from the legacy `paramsLabel` list when present, otherwise from
/// the input names. The interface inputs are only read.
fn synthesize_parameters(
    obj: &Object,
    inputs: &[AbiParam],
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<Vec<Parameter>> {
    let labels = optional_array(obj, "paramsLabel")?;
    if let Some(labels) = labels
        && labels.len() != inputs.len()
    {
        return Err(ValidationError::new(
            ErrorCode::ParameterCountMismatch,
            "paramsLabel",
            format!(
                "{} label(s) given for {} function input(s)",
                labels.len(),
                inputs.len()
            ),
        ));
    }

    let mut params = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        if input.name.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::InvalidAbi,
                "abi",
                format!("input {} is unnamed; declare `params` to bind it", i),
            ));
        }

        let label = match labels.map(|l| &l[i]) {
            None => input.name.as_str(),
            Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
            Some(Value::String(_)) => {
                return Err(ValidationError::new(
                    ErrorCode::MissingRequiredField,
                    format!("paramsLabel[{}]", i),
                    "label must not be empty",
                ));
            }
            Some(other) => return Err(wrong_type(&format!("paramsLabel[{}]", i), "a string", other)),
        };
        check_length(
            label,
            &format!("paramsLabel[{}]", i),
            ctx.config.max_label_length,
            ErrorCode::InvalidStructure,
        )?;

        let abi_type: AbiType = input.abi_type();
        if abi_type.is_unknown() {
            ctx.warn(
                WarningCode::UnrecognizedAbiType,
                "abi",
                format!(
                    "binary type `{}` of input `{}` is not recognized",
                    input.param_type, input.name
                ),
            );
        }

        params.push(Parameter::Standard(StandardParameter {
            base: ParameterBase {
                name: input.name.clone(),
                label: label.to_string(),
                input_type: infer_ui_type_from_abi_type(&abi_type),
                required: Some(true),
                fixed: None,
                description: None,
                value: None,
            },
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            pattern: None,
        }));
    }

    tracing::debug!(count = params.len(), "synthesized parameters from interface inputs");
    Ok(params)
}

/// Reconcile the attached amount with the function mutability.
fn finish(
    obj: &Object,
    checked: ParametersChecked,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<ContractCallAction> {
    let ParametersChecked { structure, params } = checked;
    let function = &structure.function;
    let mutability = function.state_mutability;

    let amount: Option<Number> = optional_number(obj, "amount")?.cloned();
    if let Some(amount) = &amount
        && !amount.as_f64().is_some_and(|a| a > 0.0)
    {
        return Err(ValidationError::new(
            ErrorCode::InvalidAmount,
            "amount",
            format!("`amount` must be positive, got {}", amount),
        ));
    }

    // An `amount` input only stands in for the attached value of payable calls.
    if !mutability.is_payable() && amount.is_some() {
        return Err(ValidationError::new(
            ErrorCode::MutabilityMismatch,
            "amount",
            format!(
                "`{}` is {} and cannot receive an attached amount",
                function.name, mutability
            ),
        )
        .with_help("remove `amount` or call a payable function"));
    }

    if mutability.is_payable() && amount.is_none() && !function.has_input(AMOUNT_PARAM_NAME) {
        let message = format!("payable function `{}` is called without an amount", function.name);
        match ctx.config.payable_amount_policy {
            PayableAmountPolicy::Warn => {
                ctx.warn(WarningCode::PayableWithoutAmount, "amount", message);
            }
            PayableAmountPolicy::Reject => {
                return Err(ValidationError::new(ErrorCode::MutabilityMismatch, "amount", message)
                    .with_help("add a positive `amount`"));
            }
        }
    }

    tracing::debug!(
        function = %function.name,
        mutability = %mutability,
        params = params.len(),
        "resolved contract call"
    );

    Ok(ContractCallAction {
        label: structure.label,
        description: structure.description,
        address: structure.address,
        abi: structure.abi,
        function_name: function.name.clone(),
        chains: structure.chains,
        params,
        amount,
        abi_params: function.inputs.clone(),
        blockchain_action_type: mutability,
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

//! Parameter validation shared by every action kind.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

use super::super::codes::ErrorCode;
use super::super::result::{ValidationError, ValidationResult};
use super::fields::{
    as_object, get_present, json_type_name, missing_field, optional_bool, optional_number,
    optional_str, optional_u64, required_label, required_str, values_equal,
};
use crate::abi::is_address_or_sender;
use crate::config::ValidatorConfig;
use crate::suggest::suggest;
use crate::schema::{
    InputType, Parameter, ParameterBase, SelectOption, SelectionParameter, StandardParameter,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").expect("valid decimal regex"));

/// Accepted `datetime` layouts besides RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate one parameter declaration.
///
/// `select` and `radio` parameters get option-list rules; every other type
/// gets standard constraint and value rules. Locations are relative to the
/// parameter object.
pub fn validate_parameter(raw: &Value, config: &ValidatorConfig) -> ValidationResult<Parameter> {
    let obj = as_object(raw, "parameter")?;

    let name = required_str(obj, "name")?;
    let label = required_label(obj, "label", config.max_label_length)?;
    let input_type = InputType::parse(required_str(obj, "type")?);
    let required = optional_bool(obj, "required")?;
    let fixed = optional_bool(obj, "fixed")?;
    let description = optional_str(obj, "description")?;

    let base = ParameterBase {
        name: name.to_string(),
        label: label.to_string(),
        input_type,
        required,
        fixed,
        description: description.map(str::to_string),
        value: get_present(obj, "value").cloned(),
    };

    if base.fixed == Some(true) && base.value.is_none() {
        return Err(ValidationError::new(
            ErrorCode::FixedValueMissing,
            "value",
            format!("fixed parameter `{}` has no value", base.name),
        ));
    }

    if base.input_type.is_selection() {
        validate_selection(obj, base).map(Parameter::Selection)
    } else {
        validate_standard(obj, base).map(Parameter::Standard)
    }
}

/// Validate a list of parameters with unique names.
///
/// When `named_only` is set, every parameter must use one of the named UI
/// kinds. Locations are relative to the object holding the list.
pub fn validate_parameter_list(
    items: &[Value],
    config: &ValidatorConfig,
    named_only: bool,
) -> ValidationResult<Vec<Parameter>> {
    let mut params: Vec<Parameter> = Vec::with_capacity(items.len());

    for (i, raw) in items.iter().enumerate() {
        let location = format!("params[{}]", i);
        let param = validate_parameter(raw, config).map_err(|e| e.within(&location))?;

        let input_type = &param.base().input_type;
        if named_only && !input_type.is_named() {
            return Err(ValidationError::new(
                ErrorCode::UnknownParameterType,
                format!("{}.type", location),
                format!("`{}` is not a known parameter type", input_type),
            )
            .with_optional_help(suggest(input_type.as_str(), InputType::named_kinds())));
        }

        if let Some(prev) = params.iter().position(|p| p.name() == param.name()) {
            return Err(ValidationError::new(
                ErrorCode::InvalidStructure,
                format!("{}.name", location),
                format!("parameter name `{}` duplicates params[{}]", param.name(), prev),
            ));
        }

        params.push(param);
    }

    Ok(params)
}

/// Validate an option list: non-empty, labelled, valued, and duplicate-free.
///
/// Locations are relative to the object holding `options`.
pub fn validate_options(raw: Option<&Value>) -> ValidationResult<Vec<SelectOption>> {
    let items = match raw {
        None | Some(Value::Null) => {
            return Err(ValidationError::new(
                ErrorCode::EmptyOptionSet,
                "options",
                "`options` is required and must not be empty",
            ));
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::new(
                ErrorCode::InvalidFieldType,
                "options",
                format!("`options` must be an array, got {}", json_type_name(other)),
            ));
        }
    };

    if items.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::EmptyOptionSet,
            "options",
            "`options` must contain at least one option",
        ));
    }

    let mut options: Vec<SelectOption> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let location = format!("options[{}]", i);
        let option = parse_option(item).map_err(|e| e.within(&location))?;

        if let Some(prev) = options.iter().position(|o| values_equal(&o.value, &option.value)) {
            return Err(ValidationError::new(
                ErrorCode::DuplicateOption,
                format!("{}.value", location),
                format!("option value {} duplicates options[{}]", option.value, prev),
            ));
        }

        if let Some(prev) = options.iter().position(|o| o.label == option.label) {
            return Err(ValidationError::new(
                ErrorCode::DuplicateOption,
                format!("{}.label", location),
                format!("option label `{}` duplicates options[{}]", option.label, prev),
            ));
        }

        options.push(option);
    }

    Ok(options)
}

/// Check a value against the rules of a standard input kind.
///
/// Locations are relative to the parameter object.
pub fn check_standard_value(param: &StandardParameter, value: &Value) -> ValidationResult<()> {
    let kind = &param.base.input_type;
    let invalid = |message: String| {
        ValidationError::new(ErrorCode::InvalidParameterValue, "value", message)
    };

    match kind {
        InputType::Email => {
            if !value.as_str().is_some_and(|s| EMAIL_RE.is_match(s)) {
                return Err(invalid(format!("{} is not a valid email address", value)));
            }
        }
        InputType::Url => {
            if !value.as_str().is_some_and(|s| Url::parse(s).is_ok()) {
                return Err(invalid(format!("{} is not a valid URL", value)));
            }
        }
        InputType::Address => {
            if !value.as_str().is_some_and(is_address_or_sender) {
                return Err(invalid(format!(
                    "{} is not a valid address or `sender`",
                    value
                )));
            }
        }
        InputType::Datetime => {
            let ok = match value {
                Value::String(s) => parse_datetime(s),
                Value::Number(n) => n.is_u64() || n.is_i64(),
                _ => false,
            };
            if !ok {
                return Err(invalid(format!("{} is not a valid datetime", value)));
            }
        }
        InputType::Date => {
            if !value
                .as_str()
                .is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
            {
                return Err(invalid(format!("{} is not a valid YYYY-MM-DD date", value)));
            }
        }
        InputType::Boolean => {
            if !value.is_boolean() {
                return Err(invalid(format!("{} is not a boolean", value)));
            }
        }
        InputType::Number => {
            let numeric = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) if DECIMAL_RE.is_match(s) => s.parse::<f64>().ok(),
                _ => None,
            };
            let Some(n) = numeric else {
                return Err(invalid(format!("{} is not a number", value)));
            };
            if let Some(min) = param.min.as_ref().and_then(|m| m.as_f64())
                && n < min
            {
                return Err(invalid(format!("{} is below the minimum {}", value, min)));
            }
            if let Some(max) = param.max.as_ref().and_then(|m| m.as_f64())
                && n > max
            {
                return Err(invalid(format!("{} is above the maximum {}", value, max)));
            }
        }
        _ => {}
    }

    if let Value::String(s) = value {
        let len = s.chars().count() as u64;
        if let Some(min) = param.min_length
            && len < min
        {
            return Err(invalid(format!(
                "value is {} characters long, minimum is {}",
                len, min
            )));
        }
        if let Some(max) = param.max_length
            && len > max
        {
            return Err(invalid(format!(
                "value is {} characters long, maximum is {}",
                len, max
            )));
        }
        if let Some(pattern) = &param.pattern
            && let Ok(re) = Regex::new(pattern)
            && !re.is_match(s)
        {
            return Err(invalid(format!("`{}` does not match pattern `{}`", s, pattern)));
        }
    }

    Ok(())
}

fn validate_standard(
    obj: &serde_json::Map<String, Value>,
    base: ParameterBase,
) -> ValidationResult<StandardParameter> {
    let min_length = optional_u64(obj, "minLength")?;
    let max_length = optional_u64(obj, "maxLength")?;
    if let (Some(min), Some(max)) = (min_length, max_length)
        && min > max
    {
        return Err(ValidationError::new(
            ErrorCode::InvalidConstraint,
            "minLength",
            format!("`minLength` ({}) is greater than `maxLength` ({})", min, max),
        ));
    }

    let min = optional_number(obj, "min")?.cloned();
    let max = optional_number(obj, "max")?.cloned();
    if let (Some(lo), Some(hi)) = (&min, &max)
        && lo.as_f64() > hi.as_f64()
    {
        return Err(ValidationError::new(
            ErrorCode::InvalidConstraint,
            "min",
            format!("`min` ({}) is greater than `max` ({})", lo, hi),
        ));
    }

    let pattern = optional_str(obj, "pattern")?;
    if let Some(pattern) = pattern
        && let Err(e) = Regex::new(pattern)
    {
        return Err(ValidationError::new(
            ErrorCode::InvalidConstraint,
            "pattern",
            format!("`pattern` is not a valid regular expression: {}", e),
        ));
    }

    let param = StandardParameter {
        base,
        min_length,
        max_length,
        min,
        max,
        pattern: pattern.map(str::to_string),
    };

    if let Some(value) = &param.base.value {
        check_standard_value(&param, value)?;
    }

    Ok(param)
}

fn validate_selection(
    obj: &serde_json::Map<String, Value>,
    base: ParameterBase,
) -> ValidationResult<SelectionParameter> {
    let options = validate_options(obj.get("options"))?;

    if base.input_type == InputType::Radio && options.len() < 2 {
        return Err(ValidationError::new(
            ErrorCode::TooFewOptions,
            "options",
            format!(
                "radio parameter `{}` needs at least 2 options, got {}",
                base.name,
                options.len()
            ),
        ));
    }

    if let Some(value) = &base.value
        && !options.iter().any(|o| values_equal(&o.value, value))
    {
        return Err(ValidationError::new(
            ErrorCode::InvalidParameterValue,
            "value",
            format!("default value {} is not one of the option values", value),
        ));
    }

    Ok(SelectionParameter { base, options })
}

fn parse_option(item: &Value) -> ValidationResult<SelectOption> {
    let obj = as_object(item, "option")?;
    let label = required_str(obj, "label")?;
    let value = get_present(obj, "value").ok_or_else(|| missing_field("value"))?;
    let description = optional_str(obj, "description")?;

    Ok(SelectOption {
        label: label.to_string(),
        value: value.clone(),
        description: description.map(str::to_string),
    })
}

fn parse_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

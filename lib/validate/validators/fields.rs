//! Raw field access helpers.
//!
//! Documents arrive as untrusted JSON. These helpers read one field of an
//! object and turn absence or a wrong JSON type into a located error.

use serde_json::{Map, Number, Value};

use super::super::codes::ErrorCode;
use super::super::result::{ValidationError, ValidationResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A JSON object.
pub type Object = Map<String, Value>;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Require a value to be an object.
pub fn as_object<'a>(value: &'a Value, what: &str) -> ValidationResult<&'a Object> {
    value.as_object().ok_or_else(|| {
        ValidationError::new(
            ErrorCode::InvalidFieldType,
            "",
            format!("{} must be an object, got {}", what, json_type_name(value)),
        )
    })
}

/// Get a field, treating `null` as absent.
pub fn get_present<'a>(obj: &'a Object, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

/// Check if a field is present and not `null`.
pub fn has(obj: &Object, field: &str) -> bool {
    get_present(obj, field).is_some()
}

/// Read a required, non-empty string field.
pub fn required_str<'a>(obj: &'a Object, field: &str) -> ValidationResult<&'a str> {
    match optional_str(obj, field)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(missing_field(field)),
    }
}

/// Read an optional string field.
pub fn optional_str<'a>(obj: &'a Object, field: &str) -> ValidationResult<Option<&'a str>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(wrong_type(field, "a string", other)),
    }
}

/// Read an optional boolean field.
pub fn optional_bool(obj: &Object, field: &str) -> ValidationResult<Option<bool>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(wrong_type(field, "a boolean", other)),
    }
}

/// Read an optional number field.
pub fn optional_number<'a>(obj: &'a Object, field: &str) -> ValidationResult<Option<&'a Number>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n)),
        Some(other) => Err(wrong_type(field, "a number", other)),
    }
}

/// Read an optional non-negative integer field.
pub fn optional_u64(obj: &Object, field: &str) -> ValidationResult<Option<u64>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| wrong_type(field, "a non-negative integer", v)),
    }
}

/// Read an optional array field.
pub fn optional_array<'a>(obj: &'a Object, field: &str) -> ValidationResult<Option<&'a Vec<Value>>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(Value::Array(a)) => Ok(Some(a)),
        Some(other) => Err(wrong_type(field, "an array", other)),
    }
}

/// Read a required array field.
pub fn required_array<'a>(obj: &'a Object, field: &str) -> ValidationResult<&'a Vec<Value>> {
    optional_array(obj, field)?.ok_or_else(|| missing_field(field))
}

/// Read an optional object field.
pub fn optional_object<'a>(obj: &'a Object, field: &str) -> ValidationResult<Option<&'a Object>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(Value::Object(o)) => Ok(Some(o)),
        Some(other) => Err(wrong_type(field, "an object", other)),
    }
}

/// Read a required label, bounded by `max_len` characters.
pub fn required_label<'a>(obj: &'a Object, field: &str, max_len: usize) -> ValidationResult<&'a str> {
    let label = required_str(obj, field)?;
    check_length(label, field, max_len, ErrorCode::InvalidStructure)?;
    Ok(label)
}

/// Fail if a string exceeds `max_len` characters.
pub fn check_length(value: &str, field: &str, max_len: usize, code: ErrorCode) -> ValidationResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::new(
            code,
            field,
            format!("`{}` is {} characters long, maximum is {}", field, len, max_len),
        ));
    }
    Ok(())
}

/// Error for a missing required field.
pub fn missing_field(field: &str) -> ValidationError {
    ValidationError::new(
        ErrorCode::MissingRequiredField,
        field,
        format!("field `{}` is required", field),
    )
}

/// Error for a field of the wrong JSON type.
pub fn wrong_type(field: &str, expected: &str, got: &Value) -> ValidationError {
    ValidationError::new(
        ErrorCode::InvalidFieldType,
        field,
        format!("`{}` must be {}, got {}", field, expected, json_type_name(got)),
    )
}

/// Get a human-readable name for a JSON value type.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compare two JSON values for equality.
///
/// Numbers compare by numeric value (`1` equals `1.0`); arrays and objects
/// compare element-wise, objects ignoring key order.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let obj = json!({ "a": "x", "b": "  ", "c": 1, "d": null });
        let obj = obj.as_object().unwrap();

        assert_eq!(required_str(obj, "a").unwrap(), "x");
        assert_eq!(
            required_str(obj, "b").unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
        assert_eq!(
            required_str(obj, "c").unwrap_err().code,
            ErrorCode::InvalidFieldType
        );
        assert_eq!(
            required_str(obj, "d").unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
        assert_eq!(required_str(obj, "e").unwrap_err().location, "e");
    }

    #[test]
    fn test_values_equal() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!("1")));
        assert!(values_equal(
            &json!({ "a": 1, "b": [1, 2] }),
            &json!({ "b": [1, 2.0], "a": 1 })
        ));
        assert!(!values_equal(&json!({ "a": 1 }), &json!({ "a": 1, "b": 2 })));
        assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("abc", "title", 3, ErrorCode::InvalidEnvelope).is_ok());
        let err = check_length("abcd", "title", 3, ErrorCode::InvalidEnvelope).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEnvelope);
    }
}

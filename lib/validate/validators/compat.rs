//! Compatibility between UI input kinds, concrete values, and binary types.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::abi::{AbiType, is_address_or_sender};
use crate::schema::InputType;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("valid integer regex"));

static HEX_BYTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x(?:[0-9a-fA-F]{2})*$").expect("valid hex regex"));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Check whether a concrete value can be encoded as `abi_type`.
///
/// Never panics, for any JSON value. Unrecognized types accept every value.
pub fn is_value_compatible(value: &Value, abi_type: &AbiType) -> bool {
    match abi_type {
        AbiType::Address => value.as_str().is_some_and(is_address_or_sender),
        AbiType::Bool => value.is_boolean(),
        AbiType::String => value.is_string(),
        AbiType::Uint(_) | AbiType::Int(_) => match value {
            Value::Number(n) => {
                n.is_i64()
                    || n.is_u64()
                    || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
            }
            Value::String(s) => INTEGER_RE.is_match(s),
            _ => false,
        },
        AbiType::Bytes => value.as_str().is_some_and(|s| HEX_BYTES_RE.is_match(s)),
        AbiType::FixedBytes(size) => value
            .as_str()
            .is_some_and(|s| HEX_BYTES_RE.is_match(s) && s.len() - 2 == size * 2),
        AbiType::Array { element, length } => match value {
            Value::Array(items) => {
                length.is_none_or(|n| items.len() == n)
                    && items.iter().all(|item| is_value_compatible(item, element))
            }
            _ => false,
        },
        AbiType::Tuple => value.is_object(),
        AbiType::Unknown(type_str) => {
            tracing::warn!(
                abi_type = %type_str,
                "unrecognized binary type; accepting value without checking"
            );
            true
        }
    }
}

/// Check whether a value is compatible with a type string.
pub fn is_value_compatible_with(value: &Value, type_str: &str) -> bool {
    is_value_compatible(value, &AbiType::parse(type_str))
}

/// Check whether a declared input kind can be bound to `abi_type`.
///
/// Textual kinds bind to `string` and byte types; `number` and `datetime`
/// bind to integers. Every other kind must name the binary type exactly.
pub fn is_ui_type_compatible(input_type: &InputType, abi_type: &AbiType) -> bool {
    if abi_type.is_unknown() {
        tracing::warn!(
            abi_type = %abi_type,
            input_type = %input_type,
            "unrecognized binary type; accepting input kind without checking"
        );
        return true;
    }

    match input_type {
        InputType::Text | InputType::Email | InputType::Url | InputType::Textarea => {
            matches!(abi_type, AbiType::String) || abi_type.is_bytes()
        }
        InputType::Number | InputType::Datetime => abi_type.is_integer(),
        other => {
            let declared = AbiType::parse(other.as_str());
            !declared.is_unknown() && declared == *abi_type
        }
    }
}

/// Pick the input kind a parameter bound to `abi_type` gets by default.
pub fn infer_ui_type_from_abi_type(abi_type: &AbiType) -> InputType {
    match abi_type {
        AbiType::Address => InputType::Address,
        AbiType::String | AbiType::Bytes | AbiType::FixedBytes(_) => InputType::Text,
        AbiType::Uint(_) | AbiType::Int(_) => InputType::Number,
        other => InputType::Other(other.to_string()),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ADDR: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn samples() -> Vec<Value> {
        vec![
            json!(null),
            json!(true),
            json!(0),
            json!(-5),
            json!(1.5),
            json!(u64::MAX),
            json!(""),
            json!("0x"),
            json!("123"),
            json!([]),
            json!([1, "2"]),
            json!({}),
            json!({ "a": [null] }),
        ]
    }

    #[test]
    fn test_totality_over_all_types() {
        let mut types = vec![
            "address".to_string(),
            "bool".to_string(),
            "string".to_string(),
            "bytes".to_string(),
            "tuple".to_string(),
        ];
        for n in 1..=32 {
            types.push(format!("bytes{}", n));
        }
        for bits in (8..=256).step_by(8) {
            types.push(format!("uint{}", bits));
            types.push(format!("int{}", bits));
        }
        let arrays: Vec<String> = types.iter().map(|t| format!("{}[]", t)).collect();
        types.extend(arrays);

        for t in &types {
            for v in samples() {
                let _ = is_value_compatible_with(&v, t);
            }
        }
    }

    #[test]
    fn test_address_values() {
        assert!(is_value_compatible_with(&json!(ADDR), "address"));
        assert!(is_value_compatible_with(&json!("sender"), "address"));
        assert!(!is_value_compatible_with(&json!("0x123"), "address"));
        assert!(!is_value_compatible_with(&json!(42), "address"));
    }

    #[test]
    fn test_integer_values() {
        assert!(is_value_compatible_with(&json!(10), "uint256"));
        assert!(is_value_compatible_with(&json!(-10), "int8"));
        assert!(is_value_compatible_with(&json!(2.0), "uint8"));
        assert!(!is_value_compatible_with(&json!(2.5), "uint8"));
        assert!(is_value_compatible_with(
            &json!("115792089237316195423570985008687907853269984665640564039457584007913129639935"),
            "uint256"
        ));
        assert!(is_value_compatible_with(&json!("-1"), "int256"));
        assert!(!is_value_compatible_with(&json!("1e18"), "uint256"));
        assert!(!is_value_compatible_with(&json!("0x10"), "uint256"));
        assert!(!is_value_compatible_with(&json!(true), "uint256"));
    }

    #[test]
    fn test_bytes_values() {
        assert!(is_value_compatible_with(&json!("0x"), "bytes"));
        assert!(is_value_compatible_with(&json!("0xdeadBEEF"), "bytes"));
        assert!(!is_value_compatible_with(&json!("0xabc"), "bytes"));
        assert!(!is_value_compatible_with(&json!("deadbeef"), "bytes"));
        assert!(is_value_compatible_with(&json!("0xdeadbeef"), "bytes4"));
        assert!(!is_value_compatible_with(&json!("0xdeadbeef"), "bytes32"));
        assert!(is_value_compatible_with(
            &json!(format!("0x{}", "ab".repeat(32))),
            "bytes32"
        ));
    }

    #[test]
    fn test_array_and_tuple_values() {
        assert!(is_value_compatible_with(&json!([ADDR, "sender"]), "address[]"));
        assert!(!is_value_compatible_with(&json!([ADDR, "0x1"]), "address[]"));
        assert!(is_value_compatible_with(&json!([]), "uint256[]"));
        assert!(is_value_compatible_with(&json!([[1], ["2"]]), "uint8[][]"));
        assert!(is_value_compatible_with(&json!([1, 2]), "uint8[2]"));
        assert!(!is_value_compatible_with(&json!([1]), "uint8[2]"));
        assert!(!is_value_compatible_with(&json!(ADDR), "address[]"));
        assert!(is_value_compatible_with(&json!({ "x": 1 }), "tuple"));
        assert!(!is_value_compatible_with(&json!([1]), "tuple"));
    }

    #[test]
    fn test_unknown_types_are_permissive() {
        assert!(is_value_compatible_with(&json!(null), "fixed128x18"));
        assert!(is_value_compatible_with(&json!("anything"), "function"));
    }

    #[test]
    fn test_ui_type_table() {
        let uint = AbiType::parse("uint256");
        let string = AbiType::parse("string");
        let bytes32 = AbiType::parse("bytes32");

        assert!(is_ui_type_compatible(&InputType::Text, &string));
        assert!(is_ui_type_compatible(&InputType::Email, &bytes32));
        assert!(is_ui_type_compatible(&InputType::Textarea, &AbiType::Bytes));
        assert!(!is_ui_type_compatible(&InputType::Text, &uint));
        assert!(is_ui_type_compatible(&InputType::Number, &uint));
        assert!(is_ui_type_compatible(&InputType::Datetime, &AbiType::Int(64)));
        assert!(!is_ui_type_compatible(&InputType::Number, &string));
    }

    #[test]
    fn test_ui_type_exact_match_for_other_types() {
        assert!(is_ui_type_compatible(&InputType::Address, &AbiType::Address));
        assert!(!is_ui_type_compatible(&InputType::Text, &AbiType::Address));
        assert!(is_ui_type_compatible(&InputType::parse("bool"), &AbiType::Bool));
        assert!(!is_ui_type_compatible(&InputType::Boolean, &AbiType::Bool));
        assert!(is_ui_type_compatible(
            &InputType::parse("address[]"),
            &AbiType::parse("address[]")
        ));
        assert!(!is_ui_type_compatible(
            &InputType::Address,
            &AbiType::parse("address[]")
        ));
        assert!(is_ui_type_compatible(&InputType::parse("tuple"), &AbiType::Tuple));
        assert!(is_ui_type_compatible(&InputType::parse("uint"), &AbiType::Uint(256)));
        assert!(!is_ui_type_compatible(&InputType::Select, &AbiType::Uint(256)));
    }

    #[test]
    fn test_inferred_types_are_compatible() {
        for t in ["address", "bool", "string", "bytes", "bytes8", "uint8", "int256", "address[]", "tuple"] {
            let abi = AbiType::parse(t);
            let inferred = infer_ui_type_from_abi_type(&abi);
            assert!(
                is_ui_type_compatible(&inferred, &abi),
                "inferred {} for {}",
                inferred,
                t
            );
        }
    }
}

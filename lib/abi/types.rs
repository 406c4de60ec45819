//! Binary parameter types.

use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A parsed interface parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// 20-byte account address.
    Address,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Dynamic byte string.
    Bytes,
    /// Fixed-width byte string (`bytes1`..`bytes32`).
    FixedBytes(usize),
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Signed integer of the given bit width.
    Int(usize),
    /// Array of `element`, with a fixed length for `T[k]`.
    Array {
        /// Element type.
        element: Box<AbiType>,
        /// Fixed length, `None` for `T[]`.
        length: Option<usize>,
    },
    /// Struct; fields are not inspected.
    Tuple,
    /// Any type string not recognized above.
    Unknown(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AbiType {
    /// Parse a type string. Never fails; unrecognized strings become [`AbiType::Unknown`].
    pub fn parse(type_str: &str) -> Self {
        let s = type_str.trim();

        if let Some(stripped) = s.strip_suffix(']')
            && let Some(open) = stripped.rfind('[')
        {
            let element = AbiType::parse(&stripped[..open]);
            let len_str = &stripped[open + 1..];
            if len_str.is_empty() {
                return AbiType::Array {
                    element: Box::new(element),
                    length: None,
                };
            }
            return match len_str.parse::<usize>() {
                Ok(length) => AbiType::Array {
                    element: Box::new(element),
                    length: Some(length),
                },
                Err(_) => AbiType::Unknown(s.to_string()),
            };
        }

        match s {
            "address" => return AbiType::Address,
            "bool" => return AbiType::Bool,
            "string" => return AbiType::String,
            "bytes" => return AbiType::Bytes,
            "uint" => return AbiType::Uint(256),
            "int" => return AbiType::Int(256),
            "tuple" => return AbiType::Tuple,
            _ => {}
        }

        if s.starts_with("tuple(") || s.starts_with('(') {
            return AbiType::Tuple;
        }

        if let Some(bits) = s.strip_prefix("uint").and_then(parse_int_width) {
            return AbiType::Uint(bits);
        }

        if let Some(bits) = s.strip_prefix("int").and_then(parse_int_width) {
            return AbiType::Int(bits);
        }

        if let Some(size) = s
            .strip_prefix("bytes")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| (1..=32).contains(n))
        {
            return AbiType::FixedBytes(size);
        }

        AbiType::Unknown(s.to_string())
    }

    /// Check if this is an unsigned or signed integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, AbiType::Uint(_) | AbiType::Int(_))
    }

    /// Check if this is a fixed or dynamic byte string type.
    pub fn is_bytes(&self) -> bool {
        matches!(self, AbiType::Bytes | AbiType::FixedBytes(_))
    }

    /// Check if this type, or any element type it contains, is unrecognized.
    pub fn is_unknown(&self) -> bool {
        match self {
            AbiType::Unknown(_) => true,
            AbiType::Array { element, .. } => element.is_unknown(),
            _ => false,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Address => write!(f, "address"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::String => write!(f, "string"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::FixedBytes(n) => write!(f, "bytes{}", n),
            AbiType::Uint(bits) => write!(f, "uint{}", bits),
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::Array {
                element,
                length: None,
            } => write!(f, "{}[]", element),
            AbiType::Array {
                element,
                length: Some(n),
            } => write!(f, "{}[{}]", element, n),
            AbiType::Tuple => write!(f, "tuple"),
            AbiType::Unknown(s) => write!(f, "{}", s),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse the bit width suffix of `uintN` / `intN`.
fn parse_int_width(suffix: &str) -> Option<usize> {
    let bits = suffix.parse::<usize>().ok()?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

//! Function lookup over an interface description.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::types::AbiType;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A function input as declared in the interface description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiParam {
    /// Parameter name (may be empty for unnamed inputs).
    #[serde(default)]
    pub name: String,

    /// Type string (e.g., "uint256", "address[]").
    #[serde(rename = "type")]
    pub param_type: String,

    /// Struct fields for tuple types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParam>>,

    /// Compiler-level type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

/// Function mutability class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// May receive value.
    Payable,
    /// Mutates state, cannot receive value.
    Nonpayable,
    /// Reads state only.
    View,
    /// Reads nothing.
    Pure,
}

/// A callable function resolved from the interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiFunction {
    /// Function name.
    pub name: String,

    /// Ordered inputs.
    pub inputs: Vec<AbiParam>,

    /// Resolved mutability class.
    pub state_mutability: StateMutability,
}

/// The functions of an interface description, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Interface {
    functions: Vec<AbiFunction>,
}

/// Errors raised while reading an interface description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// An entry is not a JSON object.
    #[error("entry {index} is not an object")]
    NotAnObject {
        /// Entry index.
        index: usize,
    },

    /// A function entry has no name.
    #[error("function entry {index} has no name")]
    MissingName {
        /// Entry index.
        index: usize,
    },

    /// A function entry could not be decoded.
    #[error("function entry {index} is malformed: {message}")]
    Malformed {
        /// Entry index.
        index: usize,
        /// Decoder message.
        message: String,
    },
}

/// Raw function entry, before mutability resolution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFunctionEntry {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    inputs: Vec<AbiParam>,

    #[serde(default)]
    state_mutability: Option<StateMutability>,

    #[serde(default)]
    payable: Option<bool>,

    #[serde(default)]
    constant: Option<bool>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AbiParam {
    /// Parse the declared type.
    pub fn abi_type(&self) -> AbiType {
        AbiType::parse(&self.param_type)
    }
}

impl StateMutability {
    /// Check if the function may receive value.
    pub fn is_payable(&self) -> bool {
        matches!(self, StateMutability::Payable)
    }

    /// The interface-description spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateMutability::Payable => "payable",
            StateMutability::Nonpayable => "nonpayable",
            StateMutability::View => "view",
            StateMutability::Pure => "pure",
        }
    }
}

impl AbiFunction {
    /// Check if any input is named `name`.
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|input| input.name == name)
    }
}

impl Interface {
    /// Read function entries from a raw interface description.
    ///
    /// Entries whose `type` is not `"function"` (events, errors, constructors)
    /// are skipped. Entries without `type` are treated as functions.
    pub fn from_entries(entries: &[Value]) -> Result<Self, AbiError> {
        let mut functions = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let obj = entry.as_object().ok_or(AbiError::NotAnObject { index })?;

            let entry_type = obj
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("function");
            if entry_type != "function" {
                continue;
            }

            let raw: RawFunctionEntry =
                serde_json::from_value(entry.clone()).map_err(|e| AbiError::Malformed {
                    index,
                    message: e.to_string(),
                })?;

            let name = raw
                .name
                .filter(|n| !n.is_empty())
                .ok_or(AbiError::MissingName { index })?;

            let state_mutability = raw.state_mutability.unwrap_or_else(|| {
                if raw.payable == Some(true) {
                    StateMutability::Payable
                } else if raw.constant == Some(true) {
                    StateMutability::View
                } else {
                    StateMutability::Nonpayable
                }
            });

            functions.push(AbiFunction {
                name,
                inputs: raw.inputs,
                state_mutability,
            });
        }

        Ok(Self { functions })
    }

    /// Look up a function by name. The first overload wins.
    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Names of all functions, in declaration order.
    pub fn function_names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name.clone()).collect()
    }

    /// Check if the interface declares no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

//! Validation error and warning codes.

use serde::Serialize;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation error codes.
///
/// Every code aborts validation of the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// E001: Document is not valid JSON.
    #[serde(rename = "E001")]
    InvalidJson,

    /// E002: A required field is missing or empty.
    #[serde(rename = "E002")]
    MissingRequiredField,

    /// E003: A field has the wrong JSON type.
    #[serde(rename = "E003")]
    InvalidFieldType,

    /// E004: Envelope field is malformed or too long.
    #[serde(rename = "E004")]
    InvalidEnvelope,

    /// E005: URL uses a protocol outside the allow-list.
    #[serde(rename = "E005")]
    DisallowedProtocol,

    /// E006: Action count is outside the allowed range.
    #[serde(rename = "E006")]
    ActionCountOutOfBounds,

    /// E007: Action matches none of the known variants.
    #[serde(rename = "E007")]
    UnknownActionType,

    /// E008: Address is not a valid (checksummed) address.
    #[serde(rename = "E008")]
    InvalidAddress,

    /// E009: Function name does not exist in the interface description.
    #[serde(rename = "E009")]
    FunctionNotFound,

    /// E010: Chain identifier is not in the allow-list.
    #[serde(rename = "E010")]
    InvalidChain,

    /// E011: Interface description is empty or malformed.
    #[serde(rename = "E011")]
    InvalidAbi,

    /// E012: Declared parameter count differs from the interface.
    #[serde(rename = "E012")]
    ParameterCountMismatch,

    /// E013: Declared parameter name differs from the interface at the same position.
    #[serde(rename = "E013")]
    ParameterOrderMismatch,

    /// E014: Parameter kind or value cannot be represented as the bound type.
    #[serde(rename = "E014")]
    TypeIncompatibility,

    /// E015: Fixed parameter has no value.
    #[serde(rename = "E015")]
    FixedValueMissing,

    /// E016: Attached value is inconsistent with the function mutability.
    #[serde(rename = "E016")]
    MutabilityMismatch,

    /// E017: Two options share a value or a label.
    #[serde(rename = "E017")]
    DuplicateOption,

    /// E018: Option list is missing or empty.
    #[serde(rename = "E018")]
    EmptyOptionSet,

    /// E019: Radio parameter has fewer than two options.
    #[serde(rename = "E019")]
    TooFewOptions,

    /// E020: Parameter type is not a known input kind.
    #[serde(rename = "E020")]
    UnknownParameterType,

    /// E021: Parameter constraints are contradictory or malformed.
    #[serde(rename = "E021")]
    InvalidConstraint,

    /// E022: Parameter value does not satisfy its type or constraints.
    #[serde(rename = "E022")]
    InvalidParameterValue,

    /// E023: A flow edge or decision option targets a missing node.
    #[serde(rename = "E023")]
    GraphReferenceError,

    /// E024: A flow node is not reachable from the initial node.
    #[serde(rename = "E024")]
    UnreachableNode,

    /// E025: Two flow nodes share an id.
    #[serde(rename = "E025")]
    DuplicateNodeId,

    /// E026: Edge condition is malformed.
    #[serde(rename = "E026")]
    InvalidCondition,

    /// E027: Relative path without a base URL.
    #[serde(rename = "E027")]
    MissingBaseUrl,

    /// E028: Path is neither absolute nor rooted.
    #[serde(rename = "E028")]
    InvalidPathFormat,

    /// E029: URL does not parse.
    #[serde(rename = "E029")]
    InvalidUrl,

    /// E030: Mutually exclusive fields are both present.
    #[serde(rename = "E030")]
    ConflictingFields,

    /// E031: Amount is not a positive number.
    #[serde(rename = "E031")]
    InvalidAmount,

    /// E032: Structure is invalid in a way not covered by a narrower code.
    #[serde(rename = "E032")]
    InvalidStructure,
}

/// Validation warning codes.
///
/// Warnings are returned with a successful result and never abort validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// W001: Payable function without an attached amount.
    #[serde(rename = "W001")]
    PayableWithoutAmount,

    /// W002: Interface parameter type is not recognized; values accepted as-is.
    #[serde(rename = "W002")]
    UnrecognizedAbiType,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::InvalidJson => "E001",
            ErrorCode::MissingRequiredField => "E002",
            ErrorCode::InvalidFieldType => "E003",
            ErrorCode::InvalidEnvelope => "E004",
            ErrorCode::DisallowedProtocol => "E005",
            ErrorCode::ActionCountOutOfBounds => "E006",
            ErrorCode::UnknownActionType => "E007",
            ErrorCode::InvalidAddress => "E008",
            ErrorCode::FunctionNotFound => "E009",
            ErrorCode::InvalidChain => "E010",
            ErrorCode::InvalidAbi => "E011",
            ErrorCode::ParameterCountMismatch => "E012",
            ErrorCode::ParameterOrderMismatch => "E013",
            ErrorCode::TypeIncompatibility => "E014",
            ErrorCode::FixedValueMissing => "E015",
            ErrorCode::MutabilityMismatch => "E016",
            ErrorCode::DuplicateOption => "E017",
            ErrorCode::EmptyOptionSet => "E018",
            ErrorCode::TooFewOptions => "E019",
            ErrorCode::UnknownParameterType => "E020",
            ErrorCode::InvalidConstraint => "E021",
            ErrorCode::InvalidParameterValue => "E022",
            ErrorCode::GraphReferenceError => "E023",
            ErrorCode::UnreachableNode => "E024",
            ErrorCode::DuplicateNodeId => "E025",
            ErrorCode::InvalidCondition => "E026",
            ErrorCode::MissingBaseUrl => "E027",
            ErrorCode::InvalidPathFormat => "E028",
            ErrorCode::InvalidUrl => "E029",
            ErrorCode::ConflictingFields => "E030",
            ErrorCode::InvalidAmount => "E031",
            ErrorCode::InvalidStructure => "E032",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            WarningCode::PayableWithoutAmount => "W001",
            WarningCode::UnrecognizedAbiType => "W002",
        };
        write!(f, "{}", code)
    }
}

//! Parameter type definitions.

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Declared input kind of a parameter.
///
/// Named UI kinds are matched first. Any other string is kept verbatim in
/// [`InputType::Other`]; contract-call parameters use this to name a binary
/// type directly (e.g., `"bool"`, `"uint256"`, `"address[]"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// Email address.
    Email,
    /// Absolute URL.
    Url,
    /// Numeric input.
    Number,
    /// Date and time.
    Datetime,
    /// Calendar date.
    Date,
    /// Checkbox / toggle.
    Boolean,
    /// Account address.
    Address,
    /// Dropdown with an option list.
    Select,
    /// Radio group with an option list.
    Radio,
    /// Any other type string.
    Other(String),
}

/// Fields shared by every parameter kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterBase {
    /// Parameter name (binds to the interface input of the same position).
    pub name: String,

    /// User-facing label.
    pub label: String,

    /// Declared input kind.
    #[serde(rename = "type")]
    pub input_type: InputType,

    /// Whether the user must supply a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Whether the value is baked into the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<bool>,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fixed or default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// A single-value parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardParameter {
    /// Shared fields.
    #[serde(flatten)]
    pub base: ParameterBase,

    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    /// Minimum numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,

    /// Maximum numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,

    /// Regular expression string values must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// A `select` or `radio` parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParameter {
    /// Shared fields.
    #[serde(flatten)]
    pub base: ParameterBase,

    /// Available choices, non-empty and duplicate-free.
    pub options: Vec<SelectOption>,
}

/// One choice of a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    /// User-facing label.
    pub label: String,

    /// Value submitted when chosen.
    pub value: Value,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validated parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    /// Single-value input.
    Standard(StandardParameter),
    /// Choice from an option list.
    Selection(SelectionParameter),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl InputType {
    /// Parse a declared type string.
    pub fn parse(type_str: &str) -> Self {
        match type_str {
            "text" => InputType::Text,
            "textarea" => InputType::Textarea,
            "email" => InputType::Email,
            "url" => InputType::Url,
            "number" => InputType::Number,
            "datetime" => InputType::Datetime,
            "date" => InputType::Date,
            "boolean" => InputType::Boolean,
            "address" => InputType::Address,
            "select" => InputType::Select,
            "radio" => InputType::Radio,
            other => InputType::Other(other.to_string()),
        }
    }

    /// The declared spelling.
    pub fn as_str(&self) -> &str {
        match self {
            InputType::Text => "text",
            InputType::Textarea => "textarea",
            InputType::Email => "email",
            InputType::Url => "url",
            InputType::Number => "number",
            InputType::Datetime => "datetime",
            InputType::Date => "date",
            InputType::Boolean => "boolean",
            InputType::Address => "address",
            InputType::Select => "select",
            InputType::Radio => "radio",
            InputType::Other(s) => s,
        }
    }

    /// Check if this kind carries an option list.
    pub fn is_selection(&self) -> bool {
        matches!(self, InputType::Select | InputType::Radio)
    }

    /// Check if this is one of the named UI kinds.
    pub fn is_named(&self) -> bool {
        !matches!(self, InputType::Other(_))
    }

    /// Spellings of all named UI kinds.
    pub fn named_kinds() -> &'static [&'static str] {
        &[
            "text", "textarea", "email", "url", "number", "datetime", "date", "boolean", "address",
            "select", "radio",
        ]
    }
}

impl Parameter {
    /// Shared fields.
    pub fn base(&self) -> &ParameterBase {
        match self {
            Parameter::Standard(p) => &p.base,
            Parameter::Selection(p) => &p.base,
        }
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Fixed or default value.
    pub fn value(&self) -> Option<&Value> {
        self.base().value.as_ref()
    }

    /// Check if the value is baked into the document.
    pub fn is_fixed(&self) -> bool {
        self.base().fixed == Some(true)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for InputType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

//! Action type definitions.

use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

use super::flow::FlowAction;
use super::parameter::{Parameter, SelectOption};
use crate::abi::{AbiParam, StateMutability};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The variant of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Contract function call.
    ContractCall,
    /// Native value transfer.
    Transfer,
    /// HTTP form submission.
    Form,
    /// Remotely resolved action.
    Dynamic,
    /// Multi-step flow.
    Flow,
}

/// Source and optional destination chain of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainContext {
    /// Chain the action executes on.
    pub source: String,

    /// Chain value is bridged to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// A validated contract call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallAction {
    /// Button label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Contract address.
    pub address: String,

    /// Interface description, as supplied.
    pub abi: Vec<Value>,

    /// Called function.
    pub function_name: String,

    /// Chain context.
    pub chains: ChainContext,

    /// Parameters, positionally bound to the function inputs.
    pub params: Vec<Parameter>,

    /// Value attached to the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,

    /// Copy of the function inputs from the interface description.
    pub abi_params: Vec<AbiParam>,

    /// Resolved mutability class of the function.
    pub blockchain_action_type: StateMutability,
}

/// How a transfer recipient is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientInputType {
    /// Pick from a list.
    Select,
    /// Free input.
    Input,
}

/// User-configurable transfer recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientConfig {
    /// Input style.
    pub input_type: RecipientInputType,

    /// Field label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Choices for `select`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// How a transfer amount is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountInputType {
    /// Pick from a dropdown.
    Select,
    /// Pick from a radio group.
    Radio,
    /// Free input.
    Input,
}

/// User-configurable transfer amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountConfig {
    /// Input style.
    pub input_type: AmountInputType,

    /// Field label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Choices for `select` / `radio`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    /// Default amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
}

/// A validated native value transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAction {
    /// Button label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Chain context.
    pub chains: ChainContext,

    /// Fixed recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Configurable recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientConfig>,

    /// Fixed amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,

    /// Configurable amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_config: Option<AmountConfig>,
}

/// A validated HTTP form submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAction {
    /// Button label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Endpoint as declared (absolute URL or rooted path).
    pub endpoint: String,

    /// Chain context, if the form is chain-aware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains: Option<ChainContext>,

    /// Form fields.
    pub params: Vec<Parameter>,

    /// Endpoint resolved against the document base URL.
    pub resolved_url: String,
}

/// A validated remotely resolved action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicAction {
    /// Button label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Resolver path as declared (absolute URL or rooted path).
    pub path: String,

    /// Chain context.
    pub chains: ChainContext,

    /// Inputs forwarded to the resolver.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,

    /// Path resolved against the document base URL.
    pub resolved_url: String,
}

/// A validated top-level action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValidatedAction {
    /// Contract function call.
    ContractCall(ContractCallAction),
    /// Native value transfer.
    Transfer(TransferAction),
    /// HTTP form submission.
    Form(FormAction),
    /// Remotely resolved action.
    Dynamic(DynamicAction),
    /// Multi-step flow.
    Flow(FlowAction),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ActionKind {
    /// Parse an explicit `kind` tag, including legacy spellings.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "contract-call" | "blockchain" => Some(ActionKind::ContractCall),
            "transfer" => Some(ActionKind::Transfer),
            "form" | "http" => Some(ActionKind::Form),
            "dynamic" => Some(ActionKind::Dynamic),
            "flow" => Some(ActionKind::Flow),
            _ => None,
        }
    }

    /// Canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::ContractCall => "contract-call",
            ActionKind::Transfer => "transfer",
            ActionKind::Form => "form",
            ActionKind::Dynamic => "dynamic",
            ActionKind::Flow => "flow",
        }
    }

    /// All tags accepted by [`ActionKind::from_tag`].
    pub fn tags() -> &'static [&'static str] {
        &[
            "contract-call",
            "blockchain",
            "transfer",
            "form",
            "http",
            "dynamic",
            "flow",
        ]
    }
}

impl ValidatedAction {
    /// The variant of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            ValidatedAction::ContractCall(_) => ActionKind::ContractCall,
            ValidatedAction::Transfer(_) => ActionKind::Transfer,
            ValidatedAction::Form(_) => ActionKind::Form,
            ValidatedAction::Dynamic(_) => ActionKind::Dynamic,
            ValidatedAction::Flow(_) => ActionKind::Flow,
        }
    }

    /// Button label.
    pub fn label(&self) -> &str {
        match self {
            ValidatedAction::ContractCall(a) => &a.label,
            ValidatedAction::Transfer(a) => &a.label,
            ValidatedAction::Form(a) => &a.label,
            ValidatedAction::Dynamic(a) => &a.label,
            ValidatedAction::Flow(a) => &a.label,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

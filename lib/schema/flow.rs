//! Flow graph type definitions.

use serde::Serialize;
use serde_json::Value;

use super::action::{ChainContext, ContractCallAction, DynamicAction, FormAction, TransferAction};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A validated multi-step flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowAction {
    /// Button label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Chain context shared by the flow, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains: Option<ChainContext>,

    /// Id of the first node.
    pub initial_action_id: String,

    /// Nodes in declaration order.
    pub actions: Vec<FlowNode>,
}

/// One node of a flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Unique node id.
    pub id: String,

    /// What the node does.
    #[serde(flatten)]
    pub step: FlowStep,

    /// Outgoing edges (always empty for decision and completion nodes).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<NextAction>,
}

/// The body of a flow node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FlowStep {
    /// Contract function call.
    ContractCall(ContractCallAction),
    /// Native value transfer.
    Transfer(TransferAction),
    /// HTTP form submission.
    Form(FormAction),
    /// Remotely resolved action.
    Dynamic(DynamicAction),
    /// User choice routing to other nodes.
    Decision(DecisionNode),
    /// Terminal node.
    Completion(CompletionNode),
}

/// An outgoing edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAction {
    /// Target node id.
    pub action_id: String,

    /// All conditions must hold for the edge to be taken.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// A field comparison guarding an edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    /// Compared field name.
    pub field: String,

    /// Comparison operator.
    pub operator: ConditionOperator,

    /// Comparison value.
    pub value: Value,
}

/// Edge condition operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperator {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Substring or element containment.
    Contains,
}

/// A node that routes on a user choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNode {
    /// Prompt shown to the user.
    pub title: String,

    /// Node label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Choices, each routing to a node.
    pub options: Vec<DecisionOption>,
}

/// One choice of a decision node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    /// User-facing label.
    pub label: String,

    /// Value recorded when chosen.
    pub value: Value,

    /// Node taken when chosen.
    pub next_action_id: String,
}

/// A terminal node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNode {
    /// Node label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Message shown when the flow ends here.
    pub message: String,

    /// Outcome.
    pub status: CompletionStatus,
}

/// Outcome of a completion node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// Flow succeeded.
    Success,
    /// Flow failed.
    Error,
    /// Informational end.
    Info,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl FlowNode {
    /// Ids of every node this node can move to.
    pub fn targets(&self) -> Vec<&str> {
        match &self.step {
            FlowStep::Decision(decision) => decision
                .options
                .iter()
                .map(|o| o.next_action_id.as_str())
                .collect(),
            _ => self
                .next_actions
                .iter()
                .map(|n| n.action_id.as_str())
                .collect(),
        }
    }
}

impl ConditionOperator {
    /// Parse an operator spelling.
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "eq" => Some(ConditionOperator::Eq),
            "ne" => Some(ConditionOperator::Ne),
            "gt" => Some(ConditionOperator::Gt),
            "lt" => Some(ConditionOperator::Lt),
            "gte" => Some(ConditionOperator::Gte),
            "lte" => Some(ConditionOperator::Lte),
            "contains" => Some(ConditionOperator::Contains),
            _ => None,
        }
    }

    /// All accepted spellings.
    pub fn names() -> &'static [&'static str] {
        &["eq", "ne", "gt", "lt", "gte", "lte", "contains"]
    }
}

impl CompletionStatus {
    /// Parse a status spelling.
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "success" => Some(CompletionStatus::Success),
            "error" => Some(CompletionStatus::Error),
            "info" => Some(CompletionStatus::Info),
            _ => None,
        }
    }
}

//! Action classification.
//!
//! Actions carry an explicit `kind` tag. Documents written before the tag
//! existed are classified by the fields they carry; that fallback exists
//! only for compatibility and runs the guards in a fixed order.

use super::super::codes::ErrorCode;
use super::super::result::{ValidationError, ValidationResult};
use super::fields::{Object, get_present, has, optional_str};
use crate::schema::ActionKind;
use crate::suggest::suggest;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The variant of a flow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// One of the action variants.
    Action(ActionKind),
    /// User choice.
    Decision,
    /// Terminal node.
    Completion,
}

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const DECISION_TAG: &str = "decision";
const COMPLETION_TAG: &str = "completion";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Determine the variant of a top-level action.
pub fn classify_action(obj: &Object) -> ValidationResult<ActionKind> {
    if let Some(tag) = optional_str(obj, "kind")? {
        return ActionKind::from_tag(tag).ok_or_else(|| unknown_tag("kind", tag, ActionKind::tags()));
    }

    let kind = classify_legacy(obj).ok_or_else(|| {
        ValidationError::new(
            ErrorCode::UnknownActionType,
            "",
            "action matches none of the known action kinds",
        )
        .with_help(format!(
            "add a `kind` field: one of {}",
            ActionKind::tags().join(", ")
        ))
    })?;

    tracing::debug!(kind = %kind, "classified untagged action by its fields");
    Ok(kind)
}

/// Determine the variant of a flow node from its `type` (or `kind`) tag.
pub fn classify_node(obj: &Object) -> ValidationResult<NodeKind> {
    let field = if has(obj, "type") { "type" } else { "kind" };

    if let Some(tag) = optional_str(obj, field)? {
        return match tag {
            DECISION_TAG => Ok(NodeKind::Decision),
            COMPLETION_TAG => Ok(NodeKind::Completion),
            other => ActionKind::from_tag(other)
                .map(NodeKind::Action)
                .ok_or_else(|| unknown_tag(field, other, &node_tags())),
        };
    }

    if has(obj, "message") && has(obj, "status") {
        return Ok(NodeKind::Completion);
    }
    if has(obj, "title") && has(obj, "options") && !has(obj, "abi") {
        return Ok(NodeKind::Decision);
    }

    classify_action(obj).map(NodeKind::Action)
}

/// Compatibility guards for untagged actions, tried in order.
fn classify_legacy(obj: &Object) -> Option<ActionKind> {
    let type_tag = get_present(obj, "type").and_then(|t| t.as_str());

    let is_flow = type_tag == Some("flow")
        || (has(obj, "initialActionId") && get_present(obj, "actions").is_some_and(|a| a.is_array()));
    if is_flow {
        return Some(ActionKind::Flow);
    }

    if has(obj, "abi") && has(obj, "functionName") {
        return Some(ActionKind::ContractCall);
    }

    let is_transfer = has(obj, "chains")
        && !["abi", "functionName", "endpoint", "path"]
            .iter()
            .any(|f| has(obj, f))
        && type_tag.is_none_or(|t| t == "transfer");
    if is_transfer {
        return Some(ActionKind::Transfer);
    }

    if has(obj, "endpoint") {
        return Some(ActionKind::Form);
    }

    if type_tag == Some("dynamic") && has(obj, "path") {
        return Some(ActionKind::Dynamic);
    }

    None
}

fn unknown_tag(field: &str, tag: &str, known: &[&str]) -> ValidationError {
    ValidationError::new(
        ErrorCode::UnknownActionType,
        field,
        format!("`{}` is not a known action kind", tag),
    )
    .with_help(
        suggest(tag, known).unwrap_or_else(|| format!("expected one of {}", known.join(", "))),
    )
}

fn node_tags() -> Vec<&'static str> {
    let mut tags = ActionKind::tags().to_vec();
    tags.extend([DECISION_TAG, COMPLETION_TAG]);
    tags
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

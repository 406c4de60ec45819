//! Flow graph validation.
//!
//! A flow is validated in three passes: node ids are collected and checked
//! for uniqueness, each node is validated against the full id set, and the
//! graph is walked from the initial node to find unreachable nodes.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet, VecDeque};

use super::super::codes::ErrorCode;
use super::super::result::{ValidationContext, ValidationError, ValidationResult};
use super::chains::validate_optional_chains;
use super::classify::{NodeKind, classify_node};
use super::contract::validate_contract_call;
use super::dynamic::validate_dynamic;
use super::fields::{
    Object, as_object, get_present, missing_field, optional_array, optional_str, required_array,
    required_label, required_str,
};
use super::form::validate_form;
use super::transfer::validate_transfer;
use crate::schema::{
    ActionKind, CompletionNode, CompletionStatus, Condition, ConditionOperator, DecisionNode,
    DecisionOption, FlowAction, FlowNode, FlowStep, NextAction,
};
use crate::suggest::suggest;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a flow action. Locations are relative to the action.
pub fn validate_flow(obj: &Object, ctx: &mut ValidationContext<'_>) -> ValidationResult<FlowAction> {
    let label = required_label(obj, "label", ctx.config.max_label_length)?;
    let description = optional_str(obj, "description")?;
    let chains = validate_optional_chains(obj.get("chains"), ctx.config)?;
    let initial = required_str(obj, "initialActionId")?;

    let items = required_array(obj, "actions")?;
    if items.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::InvalidStructure,
            "actions",
            "a flow must contain at least one node",
        ));
    }

    // Pass 1: ids.
    let mut ids: Vec<&str> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let location = format!("actions[{}]", i);
        let node = as_object(item, "flow node").map_err(|e| e.within(&location))?;
        let id = required_str(node, "id").map_err(|e| e.within(&location))?;

        if ids.contains(&id) {
            return Err(ValidationError::new(
                ErrorCode::DuplicateNodeId,
                format!("{}.id", location),
                format!("node id `{}` is declared more than once", id),
            ));
        }
        ids.push(id);
    }
    let known: HashSet<&str> = ids.iter().copied().collect();

    if !known.contains(initial) {
        return Err(reference_error("initialActionId", initial, &ids));
    }

    // Pass 2: nodes and edges.
    let mut nodes = Vec::with_capacity(items.len());
    for (item, id) in items.iter().zip(&ids) {
        let node = as_object(item, "flow node")?;
        let node = inherit_chains(node, obj.get("chains"));
        let validated = ctx.scoped(&node_segment(id), |ctx| {
            validate_node(&node, id, &known, &ids, ctx)
        })?;
        nodes.push(validated);
    }

    // Pass 3: reachability.
    check_reachability(&nodes, initial)?;

    tracing::debug!(nodes = nodes.len(), initial = %initial, "validated flow graph");

    Ok(FlowAction {
        label: label.to_string(),
        description: description.map(str::to_string),
        chains,
        initial_action_id: initial.to_string(),
        actions: nodes,
    })
}

fn validate_node(
    obj: &Object,
    id: &str,
    known: &HashSet<&str>,
    ids: &[&str],
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<FlowNode> {
    let kind = classify_node(obj)?;

    let (step, next_actions) = match kind {
        NodeKind::Decision => {
            reject_edges(obj, "decision nodes route through their options")?;
            (FlowStep::Decision(validate_decision(obj, known, ids)?), Vec::new())
        }
        NodeKind::Completion => {
            reject_edges(obj, "completion nodes end the flow")?;
            (FlowStep::Completion(validate_completion(obj)?), Vec::new())
        }
        NodeKind::Action(ActionKind::Flow) => {
            return Err(ValidationError::new(
                ErrorCode::UnknownActionType,
                "type",
                "flows cannot be nested inside a flow",
            ));
        }
        NodeKind::Action(ActionKind::ContractCall) => (
            FlowStep::ContractCall(validate_contract_call(obj, ctx)?),
            validate_edges(obj, known, ids)?,
        ),
        NodeKind::Action(ActionKind::Transfer) => (
            FlowStep::Transfer(validate_transfer(obj, ctx)?),
            validate_edges(obj, known, ids)?,
        ),
        NodeKind::Action(ActionKind::Form) => (
            FlowStep::Form(validate_form(obj, ctx)?),
            validate_edges(obj, known, ids)?,
        ),
        NodeKind::Action(ActionKind::Dynamic) => (
            FlowStep::Dynamic(validate_dynamic(obj, ctx)?),
            validate_edges(obj, known, ids)?,
        ),
    };

    Ok(FlowNode {
        id: id.to_string(),
        step,
        next_actions,
    })
}

fn validate_decision(
    obj: &Object,
    known: &HashSet<&str>,
    ids: &[&str],
) -> ValidationResult<DecisionNode> {
    let title = required_str(obj, "title")?;
    let items = required_array(obj, "options")?;
    if items.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::EmptyOptionSet,
            "options",
            "a decision needs at least one option",
        ));
    }

    let mut options = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let option = validate_decision_option(item, known, ids)
            .map_err(|e| e.within(&format!("options[{}]", i)))?;
        options.push(option);
    }

    Ok(DecisionNode {
        title: title.to_string(),
        label: optional_str(obj, "label")?.map(str::to_string),
        description: optional_str(obj, "description")?.map(str::to_string),
        options,
    })
}

fn validate_decision_option(
    item: &Value,
    known: &HashSet<&str>,
    ids: &[&str],
) -> ValidationResult<DecisionOption> {
    let option = as_object(item, "decision option")?;
    let label = required_str(option, "label")?;
    let value = get_present(option, "value").ok_or_else(|| missing_field("value"))?;
    let next = required_str(option, "nextActionId")?;
    if !known.contains(next) {
        return Err(reference_error("nextActionId", next, ids));
    }

    Ok(DecisionOption {
        label: label.to_string(),
        value: value.clone(),
        next_action_id: next.to_string(),
    })
}

fn validate_completion(obj: &Object) -> ValidationResult<CompletionNode> {
    let message = required_str(obj, "message")?;
    let status = required_str(obj, "status")?;
    let status = CompletionStatus::parse(status).ok_or_else(|| {
        ValidationError::new(
            ErrorCode::InvalidStructure,
            "status",
            format!("`{}` is not a completion status", status),
        )
        .with_help("expected one of success, error, info")
    })?;

    Ok(CompletionNode {
        label: optional_str(obj, "label")?.map(str::to_string),
        message: message.to_string(),
        status,
    })
}

fn validate_edges(
    obj: &Object,
    known: &HashSet<&str>,
    ids: &[&str],
) -> ValidationResult<Vec<NextAction>> {
    let Some(items) = optional_array(obj, "nextActions")? else {
        return Ok(Vec::new());
    };

    let mut edges = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let location = format!("nextActions[{}]", i);
        let edge = validate_edge(item, known, ids).map_err(|e| e.within(&location))?;
        edges.push(edge);
    }
    Ok(edges)
}

fn validate_edge(item: &Value, known: &HashSet<&str>, ids: &[&str]) -> ValidationResult<NextAction> {
    let obj = as_object(item, "edge")?;
    let target = required_str(obj, "actionId")?;
    if !known.contains(target) {
        return Err(reference_error("actionId", target, ids));
    }

    let mut conditions = Vec::new();
    if let Some(items) = optional_array(obj, "conditions")? {
        for (i, item) in items.iter().enumerate() {
            let condition = validate_condition(item).map_err(|e| e.within(&format!("conditions[{}]", i)))?;
            conditions.push(condition);
        }
    }

    Ok(NextAction {
        action_id: target.to_string(),
        conditions,
    })
}

fn validate_condition(item: &Value) -> ValidationResult<Condition> {
    let invalid = |location: &str, message: String| {
        ValidationError::new(ErrorCode::InvalidCondition, location, message)
    };

    let obj = item
        .as_object()
        .ok_or_else(|| invalid("", "condition must be an object".to_string()))?;

    let field = get_present(obj, "field")
        .and_then(|f| f.as_str())
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| invalid("field", "condition needs a `field` name".to_string()))?;

    let op = get_present(obj, "operator").and_then(|o| o.as_str()).unwrap_or_default();
    let operator = ConditionOperator::parse(op).ok_or_else(|| {
        invalid("operator", format!("`{}` is not a condition operator", op)).with_help(
            suggest(op, ConditionOperator::names()).unwrap_or_else(|| {
                format!("expected one of {}", ConditionOperator::names().join(", "))
            }),
        )
    })?;

    let value = get_present(obj, "value")
        .ok_or_else(|| invalid("value", "condition needs a comparison `value`".to_string()))?;

    Ok(Condition {
        field: field.to_string(),
        operator,
        value: value.clone(),
    })
}

/// Walk the graph from the initial node and reject any node not reached.
fn check_reachability(nodes: &[FlowNode], initial: &str) -> ValidationResult<()> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut visited = vec![false; nodes.len()];
    let mut queue = VecDeque::new();
    if let Some(&start) = index.get(initial) {
        visited[start] = true;
        queue.push_back(start);
    }

    while let Some(current) = queue.pop_front() {
        for target in nodes[current].targets() {
            if let Some(&next) = index.get(target)
                && !visited[next]
            {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    let unreachable: Vec<&str> = nodes
        .iter()
        .zip(&visited)
        .filter(|(_, seen)| !**seen)
        .map(|(n, _)| n.id.as_str())
        .collect();

    match unreachable.first() {
        None => Ok(()),
        Some(first) => Err(ValidationError::new(
            ErrorCode::UnreachableNode,
            node_segment(first),
            format!(
                "unreachable from `{}`: {}",
                initial,
                unreachable
                    .iter()
                    .map(|id| format!("`{}`", id))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )
        .with_help("reference the node from `nextActions` or a decision option, or remove it")),
    }
}

fn reject_edges(obj: &Object, reason: &str) -> ValidationResult<()> {
    match optional_array(obj, "nextActions")? {
        Some(edges) if !edges.is_empty() => Err(ValidationError::new(
            ErrorCode::InvalidStructure,
            "nextActions",
            format!("node has outgoing edges but {}", reason),
        )),
        _ => Ok(()),
    }
}

/// Give a node without its own `chains` the chain context of the flow.
fn inherit_chains<'a>(node: &'a Object, flow_chains: Option<&Value>) -> Cow<'a, Object> {
    match flow_chains.filter(|c| !c.is_null()) {
        Some(chains) if get_present(node, "chains").is_none() => {
            let mut node = node.clone();
            node.insert("chains".to_string(), chains.clone());
            Cow::Owned(node)
        }
        _ => Cow::Borrowed(node),
    }
}

fn reference_error(field: &str, target: &str, ids: &[&str]) -> ValidationError {
    ValidationError::new(
        ErrorCode::GraphReferenceError,
        field,
        format!("node `{}` does not exist", target),
    )
    .with_optional_help(suggest(target, ids))
}

fn node_segment(id: &str) -> String {
    format!("actions[id=\"{}\"]", id)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

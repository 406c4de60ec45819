//! Validation tests.

use super::codes::{ErrorCode, WarningCode};
use super::validators::{MetadataValidator, validate_metadata, validate_metadata_str};
use crate::abi::StateMutability;
use crate::config::{PayableAmountPolicy, ValidatorConfig};
use crate::schema::{ActionKind, FlowStep, ValidatedAction};
use serde_json::{Value, json};
use tempfile::TempDir;

const TOKEN: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
const SPENDER: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
const MAX_UINT: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

fn metadata(actions: Vec<Value>) -> Value {
    json!({
        "url": "https://example.com/app",
        "icon": "https://example.com/icon.png",
        "title": "Example",
        "description": "An example mini-app",
        "actions": actions
    })
}

fn erc20_abi() -> Value {
    json!([
        {
            "type": "function",
            "name": "approve",
            "stateMutability": "nonpayable",
            "inputs": [
                { "name": "spender", "type": "address" },
                { "name": "amount", "type": "uint256" }
            ],
            "outputs": [{ "name": "", "type": "bool" }]
        },
        {
            "type": "event",
            "name": "Approval",
            "inputs": []
        },
        {
            "type": "function",
            "name": "deposit",
            "stateMutability": "payable",
            "inputs": []
        }
    ])
}

fn approve_action() -> Value {
    json!({
        "kind": "contract-call",
        "label": "Approve",
        "address": TOKEN,
        "abi": erc20_abi(),
        "functionName": "approve",
        "chains": { "source": "avalanche" },
        "params": [
            { "name": "spender", "label": "Spender", "type": "address", "fixed": true, "value": SPENDER },
            { "name": "amount", "label": "Amount", "type": "number", "fixed": true, "value": MAX_UINT }
        ]
    })
}

fn validate(raw: &Value) -> super::ValidationResult<crate::schema::ValidatedMetadata> {
    validate_metadata(raw, &ValidatorConfig::default())
}

fn error_code(raw: &Value) -> ErrorCode {
    validate(raw).unwrap_err().code
}

//--------------------------------------------------------------------------------------------------
// Scenarios
//--------------------------------------------------------------------------------------------------

#[test]
fn test_approve_with_fixed_params() {
    let result = validate(&metadata(vec![approve_action()])).unwrap();
    match &result.actions[0] {
        ValidatedAction::ContractCall(action) => {
            assert_eq!(action.blockchain_action_type, StateMutability::Nonpayable);
            assert_eq!(action.abi_params.len(), 2);
            assert_eq!(action.abi_params[1].param_type, "uint256");
        }
        other => panic!("expected contract call, got {:?}", other.kind()),
    }
    assert!(result.warnings.is_empty());

    // Output carries the resolved mutability class
    let value = result.to_value().unwrap();
    assert_eq!(value["actions"][0]["blockchainActionType"], "nonpayable");
    assert_eq!(value["actions"][0]["kind"], "contract-call");
}

#[test]
fn test_amount_on_nonpayable_call() {
    let mut action = approve_action();
    action["amount"] = json!(0.1);
    let err = validate(&metadata(vec![action])).unwrap_err();
    assert_eq!(err.code, ErrorCode::MutabilityMismatch);
    assert_eq!(err.location, "actions[0].amount");
}

#[test]
fn test_transfer_chains() {
    let transfer = json!({
        "kind": "transfer",
        "label": "Tip",
        "to": "0xRecipient",
        "amount": 0.01,
        "chains": { "source": "avalanche" }
    });
    assert!(validate(&metadata(vec![transfer.clone()])).is_ok());

    let mut bad = transfer;
    bad["chains"] = json!({ "source": "not-a-chain" });
    let err = validate(&metadata(vec![bad])).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidChain);
    assert_eq!(err.location, "actions[0].chains.source");
}

#[test]
fn test_duplicate_select_values() {
    let form = json!({
        "kind": "form",
        "label": "Pick",
        "endpoint": "https://example.com/pick",
        "params": [{
            "name": "choice",
            "label": "Choice",
            "type": "select",
            "options": [{ "label": "A", "value": 1 }, { "label": "B", "value": 1 }]
        }]
    });
    let err = validate(&metadata(vec![form])).unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateOption);
    assert_eq!(err.location, "actions[0].params[0].options[1].value");
}

#[test]
fn test_flow_with_orphan_node() {
    let flow = json!({
        "kind": "flow",
        "label": "Onboard",
        "initialActionId": "A",
        "actions": [
            {
                "id": "A",
                "type": "transfer",
                "label": "Fund",
                "to": "0xRecipient",
                "amount": 1,
                "chains": { "source": "celo" },
                "nextActions": [{ "actionId": "B" }]
            },
            { "id": "B", "type": "completion", "message": "Done", "status": "success" },
            { "id": "C", "type": "completion", "message": "Never", "status": "info" }
        ]
    });
    let err = validate(&metadata(vec![flow])).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnreachableNode);
    assert_eq!(err.location, "actions[0].actions[id=\"C\"]");
    assert!(err.message.contains("`C`"));
    assert!(!err.message.contains("`B`"));
}

#[test]
fn test_dynamic_relative_path_needs_base_url() {
    let dynamic = json!({
        "kind": "dynamic",
        "type": "dynamic",
        "label": "Swap",
        "path": "/swap",
        "chains": { "source": "avalanche" }
    });

    let doc = metadata(vec![dynamic]);
    let err = validate(&doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingBaseUrl);
    assert_eq!(err.location, "actions[0].path");

    let mut doc = doc;
    doc["baseUrl"] = json!("https://api.example.com");
    let result = validate(&doc).unwrap();
    match &result.actions[0] {
        ValidatedAction::Dynamic(action) => {
            assert_eq!(action.resolved_url, "https://api.example.com/swap")
        }
        other => panic!("expected dynamic action, got {:?}", other.kind()),
    }
}

//--------------------------------------------------------------------------------------------------
// Envelope
//--------------------------------------------------------------------------------------------------

#[test]
fn test_invalid_json() {
    let err = validate_metadata_str("{ invalid json }", &ValidatorConfig::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidJson);
}

#[test]
fn test_envelope_must_be_object() {
    assert_eq!(error_code(&json!([1, 2])), ErrorCode::InvalidEnvelope);
}

#[test]
fn test_missing_envelope_fields() {
    let mut doc = metadata(vec![approve_action()]);
    doc.as_object_mut().unwrap().remove("title");
    let err = validate(&doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidEnvelope);
    assert_eq!(err.location, "title");

    let mut doc = metadata(vec![approve_action()]);
    doc["icon"] = json!(42);
    assert_eq!(error_code(&doc), ErrorCode::InvalidEnvelope);
}

#[test]
fn test_envelope_lengths() {
    let mut doc = metadata(vec![approve_action()]);
    doc["title"] = json!("t".repeat(101));
    assert_eq!(error_code(&doc), ErrorCode::InvalidEnvelope);

    let mut doc = metadata(vec![approve_action()]);
    doc["description"] = json!("d".repeat(501));
    assert_eq!(error_code(&doc), ErrorCode::InvalidEnvelope);
}

#[test]
fn test_disallowed_protocol() {
    let mut doc = metadata(vec![approve_action()]);
    doc["url"] = json!("javascript:alert(1)");
    let err = validate(&doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::DisallowedProtocol);
    assert_eq!(err.location, "url");

    let mut doc = metadata(vec![approve_action()]);
    doc["baseUrl"] = json!("ftp://files.example.com");
    let err = validate(&doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::DisallowedProtocol);
    assert_eq!(err.location, "baseUrl");
}

#[test]
fn test_action_count_bounds() {
    assert_eq!(error_code(&metadata(vec![])), ErrorCode::ActionCountOutOfBounds);
    assert_eq!(
        error_code(&metadata(vec![approve_action(); 5])),
        ErrorCode::ActionCountOutOfBounds
    );
    assert!(validate(&metadata(vec![approve_action(); 4])).is_ok());
}

#[test]
fn test_unknown_action_type() {
    let err = validate(&metadata(vec![json!({ "label": "Mystery" })])).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownActionType);
    assert_eq!(err.location, "actions[0]");

    let err = validate(&metadata(vec![json!({ "kind": "swap", "label": "Swap" })])).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownActionType);
    assert_eq!(err.location, "actions[0].kind");
}

#[test]
fn test_first_failure_aborts() {
    let mut bad = approve_action();
    bad["functionName"] = json!("transferFrom");
    let doc = metadata(vec![approve_action(), bad, json!({ "label": "Mystery" })]);
    let err = validate(&doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::FunctionNotFound);
    assert_eq!(err.location, "actions[1].functionName");
}

//--------------------------------------------------------------------------------------------------
// Legacy documents
//--------------------------------------------------------------------------------------------------

#[test]
fn test_untagged_actions_are_classified() {
    let mut call = approve_action();
    call.as_object_mut().unwrap().remove("kind");
    let transfer = json!({ "label": "Tip", "to": "0xRecipient", "chains": { "source": "fuji" } });
    let form = json!({ "label": "Join", "endpoint": "https://example.com/join" });
    let dynamic = json!({
        "type": "dynamic",
        "label": "Quote",
        "path": "https://example.com/quote",
        "chains": { "source": "fuji" }
    });

    let result = validate(&metadata(vec![call, transfer, form, dynamic])).unwrap();
    let kinds: Vec<ActionKind> = result.actions.iter().map(|a| a.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ActionKind::ContractCall,
            ActionKind::Transfer,
            ActionKind::Form,
            ActionKind::Dynamic
        ]
    );
}

#[test]
fn test_legacy_mutability_flags() {
    let mut call = approve_action();
    call["abi"] = json!([{
        "name": "approve",
        "constant": false,
        "payable": false,
        "inputs": [
            { "name": "spender", "type": "address" },
            { "name": "amount", "type": "uint256" }
        ]
    }]);
    let result = validate(&metadata(vec![call])).unwrap();
    match &result.actions[0] {
        ValidatedAction::ContractCall(action) => {
            assert_eq!(action.blockchain_action_type, StateMutability::Nonpayable)
        }
        other => panic!("expected contract call, got {:?}", other.kind()),
    }
}

//--------------------------------------------------------------------------------------------------
// Properties
//--------------------------------------------------------------------------------------------------

#[test]
fn test_parameter_count_mismatch_regardless_of_names() {
    let params = [
        json!({ "name": "spender", "label": "Spender", "type": "address" }),
        json!({ "name": "amount", "label": "Amount", "type": "number" }),
        json!({ "name": "extra", "label": "Extra", "type": "text" }),
    ];

    for declared in [vec![], vec![params[0].clone()], params.to_vec()] {
        let mut call = approve_action();
        call["params"] = Value::Array(declared);
        let err = validate(&metadata(vec![call])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParameterCountMismatch);
        assert_eq!(err.location, "actions[0].params");
    }

    // Swapping names keeps the count but breaks the positional binding
    let mut call = approve_action();
    call["params"] = json!([params[1].clone(), params[0].clone()]);
    assert_eq!(
        error_code(&metadata(vec![call])),
        ErrorCode::ParameterOrderMismatch
    );
}

#[test]
fn test_deep_equal_option_values_rejected() {
    let form = json!({
        "kind": "form",
        "label": "Pick",
        "endpoint": "https://example.com/pick",
        "params": [{
            "name": "bundle",
            "label": "Bundle",
            "type": "radio",
            "options": [
                { "label": "Small", "value": { "tokens": ["usdc"], "size": 1 } },
                { "label": "Also small", "value": { "size": 1, "tokens": ["usdc"] } }
            ]
        }]
    });
    assert_eq!(error_code(&metadata(vec![form])), ErrorCode::DuplicateOption);
}

#[test]
fn test_determinism() {
    let doc = metadata(vec![approve_action()]);
    assert_eq!(validate(&doc), validate(&doc));

    let mut bad = approve_action();
    bad["amount"] = json!(1);
    let doc = metadata(vec![bad]);
    assert_eq!(validate(&doc).unwrap_err(), validate(&doc).unwrap_err());
}

#[test]
fn test_idempotence() {
    let mut synthesized = approve_action();
    synthesized.as_object_mut().unwrap().remove("params");
    synthesized["paramsLabel"] = json!(["Spender", "Allowance"]);

    let mut doc = metadata(vec![
        approve_action(),
        synthesized,
        json!({
            "kind": "transfer",
            "label": "Pay",
            "chains": { "source": "celo", "destination": "avalanche" },
            "recipient": {
                "inputType": "select",
                "options": [{ "label": "Alice", "value": "0xAlice" }]
            },
            "amountConfig": {
                "inputType": "radio",
                "options": [{ "label": "One", "value": 1 }, { "label": "Two", "value": 2 }],
                "value": 1
            }
        }),
        json!({
            "kind": "flow",
            "label": "Onboard",
            "initialActionId": "ask",
            "chains": { "source": "fuji" },
            "actions": [
                {
                    "id": "ask",
                    "type": "decision",
                    "title": "Continue?",
                    "options": [
                        { "label": "Yes", "value": true, "nextActionId": "form" },
                        { "label": "No", "value": false, "nextActionId": "end" }
                    ]
                },
                {
                    "id": "form",
                    "type": "form",
                    "label": "Details",
                    "endpoint": "/details",
                    "params": [{ "name": "email", "label": "Email", "type": "email" }],
                    "nextActions": [{
                        "actionId": "end",
                        "conditions": [{ "field": "email", "operator": "contains", "value": "@" }]
                    }]
                },
                {
                    "id": "end",
                    "type": "completion",
                    "message": "Thanks",
                    "status": "success"
                }
            ]
        }),
    ]);
    doc["baseUrl"] = json!("https://api.example.com");

    let first = validate(&doc).unwrap();
    let second = validate(&first.to_value().unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(matches!(
        &second.actions[3],
        ValidatedAction::Flow(flow) if matches!(flow.actions[1].step, FlowStep::Form(_))
    ));
}

//--------------------------------------------------------------------------------------------------
// Warnings and configuration
//--------------------------------------------------------------------------------------------------

#[test]
fn test_payable_without_amount_warns() {
    let mut call = approve_action();
    call["functionName"] = json!("deposit");
    call["params"] = json!([]);
    let doc = metadata(vec![call]);

    let result = validate(&doc).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, WarningCode::PayableWithoutAmount);
    assert_eq!(result.warnings[0].location, "actions[0].amount");

    let strict = ValidatorConfig::default().with_payable_amount_policy(PayableAmountPolicy::Reject);
    let err = validate_metadata(&doc, &strict).unwrap_err();
    assert_eq!(err.code, ErrorCode::MutabilityMismatch);
}

#[test]
fn test_validator_with_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("miniapp.toml");
    std::fs::write(
        &path,
        r#"
chains = ["devnet"]
max_actions = 1
"#,
    )
    .unwrap();

    let validator = MetadataValidator::new(ValidatorConfig::load(&path).unwrap());
    let transfer = json!({ "kind": "transfer", "label": "Tip", "chains": { "source": "devnet" } });

    assert!(validator.validate(&metadata(vec![transfer.clone()])).is_ok());
    assert_eq!(
        validator
            .validate(&metadata(vec![transfer.clone(), transfer]))
            .unwrap_err()
            .code,
        ErrorCode::ActionCountOutOfBounds
    );
}

#[test]
fn test_validate_str() {
    let content = serde_json::to_string(&metadata(vec![approve_action()])).unwrap();
    let validator = MetadataValidator::default();
    assert_eq!(validator.validate_str(&content).unwrap().actions.len(), 1);
}

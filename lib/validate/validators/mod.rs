//! Validators for mini-app metadata documents.

mod chains;
mod classify;
mod contract;
mod core;
mod dynamic;
mod flow;
mod form;
mod params;
mod transfer;
mod urls;

pub mod compat;
pub mod fields;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use chains::{validate_chains, validate_optional_chains};
pub use classify::{NodeKind, classify_action, classify_node};
pub use compat::{
    infer_ui_type_from_abi_type, is_ui_type_compatible, is_value_compatible,
    is_value_compatible_with,
};
pub use contract::validate_contract_call;
pub use core::{MetadataValidator, validate_action, validate_metadata, validate_metadata_str};
pub use dynamic::validate_dynamic;
pub use flow::validate_flow;
pub use form::validate_form;
pub use params::{check_standard_value, validate_options, validate_parameter, validate_parameter_list};
pub use transfer::validate_transfer;
pub use urls::{resolve_path, validate_url};

//! Metadata validation.

mod codes;
mod result;

pub mod validators;

#[cfg(test)]
mod tests;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use codes::{ErrorCode, WarningCode};
pub use result::{
    ValidationContext, ValidationError, ValidationResult, ValidationWarning, prefix_location,
};
pub use validators::{
    MetadataValidator, infer_ui_type_from_abi_type, is_ui_type_compatible, is_value_compatible,
    is_value_compatible_with, validate_action, validate_metadata, validate_metadata_str,
    validate_parameter,
};

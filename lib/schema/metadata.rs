//! Metadata document type definitions.

use serde::Serialize;

use super::action::ValidatedAction;
use crate::validate::ValidationWarning;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A validated mini-app metadata document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedMetadata {
    /// Page the mini-app is displayed on.
    pub url: String,

    /// Icon URL.
    pub icon: String,

    /// Title.
    pub title: String,

    /// Description.
    pub description: String,

    /// Base for relative action paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Validated actions, in declaration order.
    pub actions: Vec<ValidatedAction>,

    /// Soft findings from validation.
    #[serde(skip)]
    pub warnings: Vec<ValidationWarning>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ValidatedMetadata {
    /// Serialize back into a raw document.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

//! Validation result types.

use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::codes::{ErrorCode, WarningCode};
use crate::config::ValidatorConfig;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result of validating one part of a metadata document.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The first validation failure found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message} (at `{location}`)")]
pub struct ValidationError {
    /// Error code.
    pub code: ErrorCode,

    /// Field path of the failing value (e.g., "actions[0].params[1].value").
    pub location: String,

    /// Human-readable description.
    pub message: String,

    /// Optional help suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A soft finding that does not fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Warning code.
    pub code: WarningCode,

    /// Field path the warning refers to.
    pub location: String,

    /// Human-readable description.
    pub message: String,
}

/// State threaded through every validator of one document.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    /// Allow-lists and limits.
    pub config: &'a ValidatorConfig,

    /// Parsed `baseUrl` of the enclosing document.
    pub base_url: Option<&'a Url>,

    warnings: Vec<ValidationWarning>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ValidationError {
    /// Create an error for a field path.
    pub fn new(code: ErrorCode, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            location: location.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Attach a help suggestion.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attach a help suggestion if one is available.
    pub fn with_optional_help(mut self, help: Option<String>) -> Self {
        if help.is_some() {
            self.help = help;
        }
        self
    }

    /// Prefix the location with the path of an enclosing value.
    pub fn within(mut self, segment: &str) -> Self {
        self.location = prefix_location(segment, &self.location);
        self
    }
}

impl<'a> ValidationContext<'a> {
    /// Create a context for one document.
    pub fn new(config: &'a ValidatorConfig, base_url: Option<&'a Url>) -> Self {
        Self {
            config,
            base_url,
            warnings: Vec::new(),
        }
    }

    /// Record a warning at a location relative to the current scope.
    pub fn warn(&mut self, code: WarningCode, location: impl Into<String>, message: impl Into<String>) {
        let warning = ValidationWarning {
            code,
            location: location.into(),
            message: message.into(),
        };
        tracing::warn!(code = %warning.code, location = %warning.location, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Run a nested validator, prefixing its error and warning locations with `segment`.
    pub fn scoped<T>(
        &mut self,
        segment: &str,
        f: impl FnOnce(&mut Self) -> ValidationResult<T>,
    ) -> ValidationResult<T> {
        let mark = self.warnings.len();
        let result = f(self);
        for warning in &mut self.warnings[mark..] {
            warning.location = prefix_location(segment, &warning.location);
        }
        result.map_err(|e| e.within(segment))
    }

    /// Consume the context, returning collected warnings.
    pub fn into_warnings(self) -> Vec<ValidationWarning> {
        self.warnings
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Join a parent path segment and a child location.
pub fn prefix_location(segment: &str, location: &str) -> String {
    if segment.is_empty() {
        location.to_string()
    } else if location.is_empty() {
        segment.to_string()
    } else if location.starts_with('[') {
        format!("{}{}", segment, location)
    } else {
        format!("{}.{}", segment, location)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

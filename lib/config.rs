//! Validator configuration.
//!
//! Allow-lists and limits are passed explicitly into every validation call so
//! callers and tests can substitute their own. Configuration is usually built
//! with [`ValidatorConfig::default`] or loaded from a TOML file.

use crate::constants::{
    DEFAULT_CHAINS, DEFAULT_MAX_ACTIONS, DEFAULT_MAX_DESCRIPTION_LENGTH, DEFAULT_MAX_LABEL_LENGTH,
    DEFAULT_MAX_TITLE_LENGTH, DEFAULT_URL_PROTOCOLS,
};
use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Configuration for metadata validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Chain identifiers accepted as `chains.source` / `chains.destination`.
    pub chains: Vec<String>,

    /// URL schemes accepted for envelope and endpoint URLs.
    pub url_protocols: Vec<String>,

    /// Maximum number of top-level actions.
    pub max_actions: usize,

    /// Maximum title length in characters.
    pub max_title_length: usize,

    /// Maximum description length in characters.
    pub max_description_length: usize,

    /// Maximum action and parameter label length in characters.
    pub max_label_length: usize,

    /// How to treat a payable call that attaches no amount.
    pub payable_amount_policy: PayableAmountPolicy,

    /// Require transfer recipients to be fully valid addresses.
    pub strict_recipient_address: bool,
}

/// Policy for payable contract calls without an attached amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayableAmountPolicy {
    /// Record a warning and accept the action.
    #[default]
    Warn,
    /// Reject the action with a mutability mismatch.
    Reject,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ValidatorConfig {
    /// Parse a configuration from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(content: &str) -> SchemaResult<Self> {
        let config: ValidatorConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded validator config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> SchemaResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replace the chain allow-list.
    pub fn with_chains<I, S>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chains = chains.into_iter().map(Into::into).collect();
        self
    }

    /// Set the payable amount policy.
    pub fn with_payable_amount_policy(mut self, policy: PayableAmountPolicy) -> Self {
        self.payable_amount_policy = policy;
        self
    }

    /// Check whether a chain identifier is allowed.
    pub fn is_chain_allowed(&self, chain: &str) -> bool {
        self.chains.iter().any(|c| c == chain)
    }

    /// Check whether a URL scheme is allowed.
    pub fn is_protocol_allowed(&self, scheme: &str) -> bool {
        self.url_protocols
            .iter()
            .any(|p| p.eq_ignore_ascii_case(scheme))
    }

    fn check(&self) -> SchemaResult<()> {
        if self.chains.is_empty() {
            return Err(SchemaError::InvalidConfig(
                "`chains` must list at least one chain".into(),
            ));
        }
        if self.url_protocols.is_empty() {
            return Err(SchemaError::InvalidConfig(
                "`url_protocols` must list at least one protocol".into(),
            ));
        }
        if self.max_actions == 0 {
            return Err(SchemaError::InvalidConfig(
                "`max_actions` must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            chains: DEFAULT_CHAINS.iter().map(|c| c.to_string()).collect(),
            url_protocols: DEFAULT_URL_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            max_actions: DEFAULT_MAX_ACTIONS,
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            max_description_length: DEFAULT_MAX_DESCRIPTION_LENGTH,
            max_label_length: DEFAULT_MAX_LABEL_LENGTH,
            payable_amount_policy: PayableAmountPolicy::default(),
            strict_recipient_address: false,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

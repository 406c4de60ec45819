//! Constants for miniapp-schema.
//!
//! Default allow-lists and limits used when no configuration file is supplied.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Chain identifiers accepted by default in `chains.source` / `chains.destination`.
pub const DEFAULT_CHAINS: &[&str] = &["avalanche", "fuji", "celo", "alfajores", "monad-testnet"];

/// URL schemes accepted by default for envelope and endpoint URLs.
pub const DEFAULT_URL_PROTOCOLS: &[&str] = &["http", "https"];

/// Maximum number of top-level actions in a metadata document.
pub const DEFAULT_MAX_ACTIONS: usize = 4;

/// Maximum length of the metadata title.
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 100;

/// Maximum length of the metadata description.
pub const DEFAULT_MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length of action and parameter labels.
pub const DEFAULT_MAX_LABEL_LENGTH: usize = 60;

/// Parameter value that resolves to the connected wallet at execution time.
pub const SENDER_SENTINEL: &str = "sender";

/// Name of the interface parameter that carries attached value.
pub const AMOUNT_PARAM_NAME: &str = "amount";

/// Environment variable pointing at a validator configuration file.
pub const MINIAPP_CONFIG_ENV: &str = "MINIAPP_CONFIG";

//! `miniapp-schema` library.
//!
//! Validates mini-app action metadata documents: the envelope, each action, and
//! the flows that chain actions together.

pub mod abi;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod schema;
pub mod styles;
pub mod suggest;
pub mod validate;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use abi::*;
pub use commands::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use schema::*;
pub use validate::*;

//! Validated mini-app document types.
//!
//! These are produced only by the validators in [`crate::validate`]. They
//! serialize back into a raw document that validates to the same result.

mod action;
mod flow;
mod metadata;
mod parameter;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use action::*;
pub use flow::*;
pub use metadata::*;
pub use parameter::*;

//! Contract interface (ABI) model.
//!
//! The interface description is supplied by the document author and is only
//! ever read: functions are looked up by name and their inputs iterated in
//! order. Nothing in this module mutates caller data.

mod address;
mod interface;
mod types;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use address::{is_address_or_sender, is_valid_address, to_checksum_address};
pub use interface::{AbiError, AbiFunction, AbiParam, Interface, StateMutability};
pub use types::AbiType;

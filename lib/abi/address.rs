//! Account address validation.

use crate::constants::SENDER_SENTINEL;
use regex::Regex;
use sha3::{Digest, Keccak256};
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address regex"));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Check if a string is a valid account address.
///
/// Single-case addresses are accepted on length and alphabet alone. Mixed-case
/// addresses must carry a correct EIP-55 checksum.
pub fn is_valid_address(value: &str) -> bool {
    if !ADDRESS_RE.is_match(value) {
        return false;
    }

    let hex = &value[2..];
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    to_checksum_address(value).is_some_and(|checksummed| checksummed == value)
}

/// Check if a string is a valid address or the `"sender"` placeholder.
pub fn is_address_or_sender(value: &str) -> bool {
    value == SENDER_SENTINEL || is_valid_address(value)
}

/// Compute the EIP-55 checksummed form of an address.
///
/// Returns `None` if the input is not `0x` followed by 40 hex digits.
pub fn to_checksum_address(value: &str) -> Option<String> {
    if !ADDRESS_RE.is_match(value) {
        return None;
    }

    let lower = value[2..].to_ascii_lowercase();
    let mut hasher = Keccak256::new();
    hasher.update(lower.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Some(out)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

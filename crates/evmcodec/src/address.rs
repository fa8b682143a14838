//! Address validation and EIP-55 checksumming.

use alloy_primitives::Address;

use crate::hex::HexError;

/// Returns true for `0x` followed by exactly 40 hex digits (any case).
pub fn is_address(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => digits.len() == 40 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parse an address string.
///
/// Mixed-case input must carry a valid EIP-55 checksum; all-lowercase and all-uppercase
/// input is accepted as is.
pub fn get_address(value: &str) -> Result<Address, HexError> {
    if !is_address(value) {
        return Err(HexError::InvalidAddress(value.to_string()));
    }
    let digits = &value[2..];
    let address: Address =
        value.parse().map_err(|_| HexError::InvalidAddress(value.to_string()))?;

    let mixed = digits.bytes().any(|b| b.is_ascii_lowercase())
        && digits.bytes().any(|b| b.is_ascii_uppercase());
    if mixed && checksum_address(&address) != value {
        return Err(HexError::InvalidAddress(value.to_string()));
    }
    Ok(address)
}

/// EIP-55 mixed-case rendering of `address`.
#[inline]
pub fn checksum_address(address: &Address) -> String {
    address.to_checksum(None)
}

use alloy_primitives::{keccak256, B256};
use evmcodec_types::AbiItem;

use super::{format_abi_item, normalize_signature, AbiError};

/// First four bytes of the keccak256 of a function or error signature.
pub type Selector = [u8; 4];

/// Selector of a function signature; any form accepted by
/// [`parse_abi_item`](super::parse_abi_item) works.
pub fn function_selector(signature: &str) -> Result<Selector, AbiError> {
    Ok(selector_of(&normalize_signature(signature)?))
}

/// Topic 0 of an event signature.
pub fn event_selector(signature: &str) -> Result<B256, AbiError> {
    Ok(keccak256(normalize_signature(signature)?))
}

/// Selector of a function or error item.
pub fn item_selector(item: &AbiItem) -> Result<Selector, AbiError> {
    Ok(selector_of(&format_abi_item(item)?))
}

/// Full keccak256 of an item's signature (the topic for events).
pub fn item_topic(item: &AbiItem) -> Result<B256, AbiError> {
    Ok(keccak256(format_abi_item(item)?))
}

#[inline]
fn selector_of(normalized: &str) -> Selector {
    let hash = keccak256(normalized);
    [hash[0], hash[1], hash[2], hash[3]]
}

//! RLP items as JSON: hex strings for byte strings, arrays for lists.

use alloy_primitives::hex;
use evmcodec::{hex::hex_to_bytes, RlpItem};
use serde_json::Value;

use crate::FormatError;

pub fn rlp_from_json(value: &Value) -> Result<RlpItem, FormatError> {
    match value {
        Value::String(text) => Ok(RlpItem::bytes(hex_to_bytes(text)?)),
        Value::Array(items) => Ok(RlpItem::List(items.iter().map(rlp_from_json).collect::<Result<_, _>>()?)),
        other => Err(FormatError::invalid("rlp", format!("expected hex string or array, given {other}"))),
    }
}

pub fn rlp_to_json(item: &RlpItem) -> Value {
    match item {
        RlpItem::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        RlpItem::List(items) => Value::Array(items.iter().map(rlp_to_json).collect()),
    }
}

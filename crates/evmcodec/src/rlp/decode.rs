use alloy_primitives::Bytes;
use alloy_rlp::Header;

use super::{RlpError, RlpItem};
use crate::hex::hex_to_bytes;

/// Maximum list nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 128;

/// Decode exactly one item from `data`; leftover bytes are an error.
pub fn from_rlp(data: &[u8]) -> Result<RlpItem, RlpError> {
    let mut buf = data;
    let item = decode_item(&mut buf, 0)?;
    if !buf.is_empty() {
        return Err(RlpError::TrailingBytes(buf.len()));
    }
    Ok(item)
}

/// Hex counterpart of [`from_rlp`].
pub fn from_rlp_hex(data: &str) -> Result<RlpItem, RlpError> {
    from_rlp(&hex_to_bytes(data)?)
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<RlpItem, RlpError> {
    if depth > MAX_DEPTH {
        return Err(RlpError::TooDeep);
    }

    // Header::decode rejects non-canonical prefixes and lengths.
    let header = Header::decode(buf)?;
    if buf.len() < header.payload_length {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (mut payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;

    if !header.list {
        return Ok(RlpItem::Bytes(Bytes::copy_from_slice(payload)));
    }

    let mut items = Vec::new();
    while !payload.is_empty() {
        items.push(decode_item(&mut payload, depth + 1)?);
    }
    Ok(RlpItem::List(items))
}

use alloy_primitives::{hex, Bytes};

use super::RlpItem;

/// Encode `item` and return the bytes.
pub fn to_rlp(item: &RlpItem) -> Bytes {
    let mut out = Vec::with_capacity(encoded_len(item));
    encode_rlp_into(item, &mut out);
    Bytes::from(out)
}

/// Encode `item` as a `0x`-prefixed hex string.
#[inline]
pub fn to_rlp_hex(item: &RlpItem) -> String {
    hex::encode_prefixed(to_rlp(item))
}

/// Encode `item` into the provided buffer.
///
/// Prefer this over [`to_rlp`] when encoding many items with a reusable buffer.
pub fn encode_rlp_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(bytes) => encode_string(out, bytes),
        RlpItem::List(items) => {
            encode_list_header(out, items.iter().map(encoded_len).sum());
            for child in items {
                encode_rlp_into(child, out);
            }
        }
    }
}

/// Length of the encoding of `item`, prefix included.
pub fn encoded_len(item: &RlpItem) -> usize {
    match item {
        RlpItem::Bytes(bytes) => rlp_string_len(bytes),
        RlpItem::List(items) => {
            let payload: usize = items.iter().map(encoded_len).sum();
            header_len(payload) + payload
        }
    }
}

/// Trim leading zero bytes from a big-endian encoded integer.
/// Returns empty slice for zero values.
#[inline]
pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b != 0) {
        Some(idx) => &bytes[idx..],
        None => &[],
    }
}

#[inline]
const fn rlp_string_len(data: &[u8]) -> usize {
    if data.len() == 1 && data[0] < 0x80 {
        1
    } else {
        header_len(data.len()) + data.len()
    }
}

/// Prefix size for a payload of `len` bytes.
#[inline]
const fn header_len(len: usize) -> usize {
    if len < 56 {
        1
    } else {
        1 + len_of_length(len)
    }
}

/// Bytes needed to write `len` big-endian.
#[inline]
const fn len_of_length(len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (usize::BITS as usize - len.leading_zeros() as usize).div_ceil(8)
    }
}

#[inline]
fn encode_list_header(out: &mut Vec<u8>, payload_len: usize) {
    encode_header(out, 0xc0, payload_len);
}

fn encode_string(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < 0x80 {
        out.push(data[0]);
    } else {
        encode_header(out, 0x80, data.len());
        out.extend_from_slice(data);
    }
}

/// Short form `offset + len`; long form `offset + 55 + len_of_len` followed by the length.
fn encode_header(out: &mut Vec<u8>, offset: u8, len: usize) {
    if len < 56 {
        out.push(offset + len as u8);
    } else {
        let len_bytes = len_of_length(len);
        out.push(offset + 55 + len_bytes as u8);
        out.extend_from_slice(&len.to_be_bytes()[size_of::<usize>() - len_bytes..]);
    }
}

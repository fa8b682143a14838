//! Value → hex conversions.

use alloy_primitives::{hex, Bytes, I256, U256};

use super::{assert_size, pad_hex, HexError, PadOptions};

/// Types that can be rendered as a `0x`-prefixed hex string.
///
/// `size` pads the output to a fixed byte width. Numbers and booleans pad on the left,
/// strings and bytes on the right.
pub trait HexEncode {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError>;
}

/// Encode any [`HexEncode`] value as hex.
#[inline]
pub fn to_hex<T: HexEncode + ?Sized>(value: &T, size: Option<usize>) -> Result<String, HexError> {
    value.encode_hex(size)
}

impl HexEncode for bool {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        bool_to_hex(*self, size)
    }
}

impl HexEncode for str {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        string_to_hex(self, size)
    }
}

impl HexEncode for String {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        string_to_hex(self, size)
    }
}

impl HexEncode for [u8] {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        bytes_to_hex(self, size)
    }
}

impl HexEncode for Vec<u8> {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        bytes_to_hex(self, size)
    }
}

impl HexEncode for Bytes {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        bytes_to_hex(self, size)
    }
}

impl HexEncode for U256 {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        uint_to_hex(*self, size)
    }
}

impl HexEncode for u64 {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        uint_to_hex(U256::from(*self), size)
    }
}

impl HexEncode for u128 {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        uint_to_hex(U256::from(*self), size)
    }
}

/// Signed values need a width for two's complement; without one, 32 bytes is used.
impl HexEncode for I256 {
    fn encode_hex(&self, size: Option<usize>) -> Result<String, HexError> {
        int_to_hex(*self, size.unwrap_or(32))
    }
}

/// `true` → `0x1`, `false` → `0x0`, left-padded when `size` is set.
pub fn bool_to_hex(value: bool, size: Option<usize>) -> Result<String, HexError> {
    let hex = if value { "0x1" } else { "0x0" };
    match size {
        Some(size) => {
            assert_size(1, Some(size))?;
            pad_hex(hex, PadOptions::left(size))
        }
        None => Ok(hex.to_string()),
    }
}

/// Bytes → hex, right-padded when `size` is set.
pub fn bytes_to_hex(value: &[u8], size: Option<usize>) -> Result<String, HexError> {
    let encoded = hex::encode_prefixed(value);
    match size {
        Some(size) => {
            assert_size(value.len(), Some(size))?;
            pad_hex(&encoded, PadOptions::right(size))
        }
        None => Ok(encoded),
    }
}

/// UTF-8 string → hex, right-padded when `size` is set.
#[inline]
pub fn string_to_hex(value: &str, size: Option<usize>) -> Result<String, HexError> {
    bytes_to_hex(value.as_bytes(), size)
}

/// Unsigned integer → big-endian hex.
///
/// Without `size` the output is minimal (`0` → `0x0`). With `size` the value must fit
/// into `size` bytes and is left-padded to exactly that width.
pub fn uint_to_hex(value: U256, size: Option<usize>) -> Result<String, HexError> {
    let Some(size) = size else {
        return Ok(format!("0x{value:x}"));
    };

    let max = uint_max(size * 8);
    if value > max {
        return Err(HexError::IntegerOutOfRange {
            value: value.to_string(),
            min: "0".to_string(),
            max: max.to_string(),
            size: Some(size),
            signed: false,
        });
    }
    pad_hex(&format!("0x{value:x}"), PadOptions::left(size))
}

/// Signed integer → two's complement hex over exactly `size` bytes (1..=32).
pub fn int_to_hex(value: I256, size: usize) -> Result<String, HexError> {
    if size == 0 || size > 32 {
        return Err(HexError::SizeOverflow { given_size: size, max_size: 32 });
    }

    let (min, max) = int_bounds(size * 8);
    if value < min || value > max {
        return Err(HexError::IntegerOutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            size: Some(size),
            signed: true,
        });
    }

    // Sign extension to 256 bits is already done by the raw representation.
    let word = value.into_raw().to_be_bytes::<32>();
    Ok(hex::encode_prefixed(&word[32 - size..]))
}

/// Largest unsigned value representable in `bits` bits (saturating at 256).
pub(crate) fn uint_max(bits: usize) -> U256 {
    if bits >= 256 {
        U256::MAX
    } else {
        (U256::from(1u8) << bits) - U256::from(1u8)
    }
}

/// Inclusive `(min, max)` of a two's complement integer of `bits` bits (8..=256).
pub(crate) fn int_bounds(bits: usize) -> (I256, I256) {
    let bits = bits.clamp(1, 256);
    let max = I256::from_raw((U256::from(1u8) << (bits - 1)) - U256::from(1u8));
    let min = I256::from_raw(U256::MAX << (bits - 1));
    (min, max)
}

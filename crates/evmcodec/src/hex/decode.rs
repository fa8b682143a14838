//! Hex → value conversions.

use alloy_primitives::{hex, Bytes, I256, U256};

use super::{assert_size, strip_prefix, trim_bytes, Direction, HexError};

/// Types that can be decoded from a `0x`-prefixed hex string.
///
/// When `size` is set the input may not be longer than `size` bytes.
pub trait HexDecode: Sized {
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError>;
}

/// Decode hex into any [`HexDecode`] type.
#[inline]
pub fn from_hex<T: HexDecode>(value: &str, size: Option<usize>) -> Result<T, HexError> {
    T::decode_hex(value, size)
}

/// Decode a hex string into bytes. Case-insensitive; odd lengths gain a leading `0`.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_prefix(value)?;
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    decoded.map_err(|_| HexError::InvalidHex(value.to_string()))
}

impl HexDecode for Vec<u8> {
    /// With `size`, the bytes are right-padded to that width.
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        let mut bytes = hex_to_bytes(value)?;
        assert_size(bytes.len(), size)?;
        if let Some(size) = size {
            bytes.resize(size, 0);
        }
        Ok(bytes)
    }
}

impl HexDecode for Bytes {
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        Vec::<u8>::decode_hex(value, size).map(Bytes::from)
    }
}

impl HexDecode for U256 {
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        let bytes = hex_to_bytes(value)?;
        assert_size(bytes.len(), size)?;
        let bytes = trim_bytes(&bytes, Direction::Left);
        assert_size(bytes.len(), Some(32))?;
        Ok(U256::from_be_slice(bytes))
    }
}

impl HexDecode for u64 {
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        let wide = U256::decode_hex(value, size)?;
        u64::try_from(wide).map_err(|_| HexError::IntegerOutOfRange {
            value: wide.to_string(),
            min: "0".to_string(),
            max: u64::MAX.to_string(),
            size: Some(8),
            signed: false,
        })
    }
}

/// The sign bit is the top bit of the input's own width, so `0xff` is `-1` while
/// `0x00ff` is `255`.
impl HexDecode for I256 {
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        let bytes = hex_to_bytes(value)?;
        assert_size(bytes.len(), size)?;
        assert_size(bytes.len(), Some(32))?;
        if bytes.is_empty() {
            return Ok(I256::ZERO);
        }

        let fill = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
        let mut word = [fill; 32];
        word[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(I256::from_raw(U256::from_be_bytes(word)))
    }
}

impl HexDecode for bool {
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        let bytes = hex_to_bytes(value)?;
        assert_size(bytes.len(), size)?;
        match trim_bytes(&bytes, Direction::Left) {
            [0] => Ok(false),
            [1] => Ok(true),
            _ => Err(HexError::InvalidHexBoolean(value.to_string())),
        }
    }
}

impl HexDecode for String {
    /// With `size`, trailing zero padding is removed before UTF-8 decoding.
    fn decode_hex(value: &str, size: Option<usize>) -> Result<Self, HexError> {
        let bytes = hex_to_bytes(value)?;
        assert_size(bytes.len(), size)?;
        let bytes = if size.is_some() {
            let trimmed = trim_bytes(&bytes, Direction::Right);
            if trimmed == [0] { &[][..] } else { trimmed }
        } else {
            &bytes[..]
        };
        String::from_utf8(bytes.to_vec()).map_err(|_| HexError::InvalidUtf8)
    }
}

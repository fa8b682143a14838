//! Hex and byte codec.
//!
//! Everything above this module speaks either raw bytes or `0x`-prefixed hex strings.
//! Output hex is always lowercase; input is accepted in any case. Odd-length hex is
//! treated as if it had a leading `0` nibble.

mod decode;
mod encode;

use bon::Builder;
use thiserror::Error;

pub use decode::{from_hex, hex_to_bytes, HexDecode};
pub use encode::{
    bool_to_hex, bytes_to_hex, int_to_hex, string_to_hex, to_hex, uint_to_hex, HexEncode,
};

pub(crate) use encode::{int_bounds, uint_max};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex string: {0:?}")]
    InvalidHex(String),
    #[error("number {value} is not in safe integer range ({min} to {max})")]
    IntegerOutOfRange { value: String, min: String, max: String, size: Option<usize>, signed: bool },
    #[error("{kind} size ({size}) exceeds padding size ({target_size})")]
    SizeExceedsPaddingSize { size: usize, target_size: usize, kind: &'static str },
    #[error("size cannot exceed {max_size} bytes, given size: {given_size} bytes")]
    SizeOverflow { given_size: usize, max_size: usize },
    #[error("slice {position} offset {offset} is out-of-bounds (size: {size})")]
    SliceOffsetOutOfBounds { offset: usize, position: &'static str, size: usize },
    #[error("hex value {0:?} is not a valid boolean")]
    InvalidHexBoolean(String),
    #[error("hex value is not valid UTF-8")]
    InvalidUtf8,
    #[error("address {0:?} is invalid")]
    InvalidAddress(String),
}

/// Which side receives padding (or loses zeros when trimming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

/// Options for [`pad_hex`] and [`pad_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct PadOptions {
    /// Target size in bytes.
    #[builder(default = 32)]
    pub size: usize,
    #[builder(default)]
    pub dir: Direction,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self { size: 32, dir: Direction::Left }
    }
}

impl PadOptions {
    /// Right-pad to `size` bytes.
    #[inline]
    pub const fn right(size: usize) -> Self {
        Self { size, dir: Direction::Right }
    }

    /// Left-pad to `size` bytes.
    #[inline]
    pub const fn left(size: usize) -> Self {
        Self { size, dir: Direction::Left }
    }
}

/// Returns the hex digits of `value` without the `0x` prefix.
#[inline]
pub(crate) fn strip_prefix(value: &str) -> Result<&str, HexError> {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| HexError::InvalidHex(value.to_string()))
}

/// Check whether `value` is a hex string.
///
/// In strict mode every character after `0x` must be a hex digit; otherwise only
/// the prefix is checked.
pub fn is_hex(value: &str, strict: bool) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => !strict || digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Size in bytes of a hex string (odd nibble counts round up).
#[inline]
pub fn size_hex(value: &str) -> usize {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    digits.len().div_ceil(2)
}

/// Size in bytes of a byte slice.
#[inline]
pub const fn size_bytes(value: &[u8]) -> usize {
    value.len()
}

/// Pad a hex string to `options.size` bytes. Never truncates.
pub fn pad_hex(value: &str, options: PadOptions) -> Result<String, HexError> {
    let digits = strip_prefix(value)?;
    let target = options.size * 2;
    if digits.len() > target {
        return Err(HexError::SizeExceedsPaddingSize {
            size: digits.len().div_ceil(2),
            target_size: options.size,
            kind: "hex",
        });
    }

    let fill = "0".repeat(target - digits.len());
    let digits = digits.to_ascii_lowercase();
    Ok(match options.dir {
        Direction::Left => format!("0x{fill}{digits}"),
        Direction::Right => format!("0x{digits}{fill}"),
    })
}

/// Pad a byte slice to `options.size` bytes. Never truncates.
pub fn pad_bytes(value: &[u8], options: PadOptions) -> Result<Vec<u8>, HexError> {
    if value.len() > options.size {
        return Err(HexError::SizeExceedsPaddingSize {
            size: value.len(),
            target_size: options.size,
            kind: "bytes",
        });
    }

    let mut out = vec![0u8; options.size];
    match options.dir {
        Direction::Left => out[options.size - value.len()..].copy_from_slice(value),
        Direction::Right => out[..value.len()].copy_from_slice(value),
    }
    Ok(out)
}

/// Strip zero nibbles from one side of a hex string.
///
/// At least one nibble is kept, and the result is re-padded to an even length, so
/// `0x0000` trims to `0x00` and `0x000a` to `0x0a`.
pub fn trim_hex(value: &str, dir: Direction) -> Result<String, HexError> {
    let digits = strip_prefix(value)?;
    let zeros = match dir {
        Direction::Left => digits.bytes().take_while(|&b| b == b'0').count(),
        Direction::Right => digits.bytes().rev().take_while(|&b| b == b'0').count(),
    };
    let zeros = zeros.min(digits.len().saturating_sub(1));

    let mut trimmed = match dir {
        Direction::Left => digits[zeros..].to_ascii_lowercase(),
        Direction::Right => digits[..digits.len() - zeros].to_ascii_lowercase(),
    };
    if trimmed.len() == 1 && dir == Direction::Right {
        trimmed.push('0');
    }
    if trimmed.len() % 2 == 1 {
        trimmed.insert(0, '0');
    }
    Ok(format!("0x{trimmed}"))
}

/// Strip zero bytes from one side of a byte slice, keeping at least one byte.
pub fn trim_bytes(value: &[u8], dir: Direction) -> &[u8] {
    if value.is_empty() {
        return value;
    }
    let last = value.len() - 1;
    match dir {
        Direction::Left => {
            let zeros = value[..last].iter().take_while(|&&b| b == 0).count();
            &value[zeros..]
        }
        Direction::Right => {
            let zeros = value[1..].iter().rev().take_while(|&&b| b == 0).count();
            &value[..value.len() - zeros]
        }
    }
}

/// Slice `value[start..end]`.
///
/// `start` must lie inside the value. `end` is clamped to the length unless `strict`
/// is set, in which case the slice must be exactly `end - start` bytes long.
pub fn slice_bytes(
    value: &[u8],
    start: usize,
    end: Option<usize>,
    strict: bool,
) -> Result<&[u8], HexError> {
    let size = value.len();
    if start > 0 && start >= size {
        return Err(HexError::SliceOffsetOutOfBounds { offset: start, position: "start", size });
    }

    let stop = end.unwrap_or(size).min(size);
    let sliced = if stop <= start { &value[..0] } else { &value[start..stop] };

    if strict {
        if let Some(end) = end {
            if sliced.len() != end.saturating_sub(start) {
                return Err(HexError::SliceOffsetOutOfBounds {
                    offset: end,
                    position: "end",
                    size,
                });
            }
        }
    }
    Ok(sliced)
}

/// Hex counterpart of [`slice_bytes`]; offsets are in bytes.
pub fn slice_hex(
    value: &str,
    start: usize,
    end: Option<usize>,
    strict: bool,
) -> Result<String, HexError> {
    let bytes = hex_to_bytes(value)?;
    let sliced = slice_bytes(&bytes, start, end, strict)?;
    Ok(alloy_primitives::hex::encode_prefixed(sliced))
}

/// Concatenate hex strings.
pub fn concat_hex<S: AsRef<str>>(values: &[S]) -> Result<String, HexError> {
    let mut out = String::from("0x");
    for value in values {
        out.push_str(&strip_prefix(value.as_ref())?.to_ascii_lowercase());
    }
    Ok(out)
}

/// Concatenate byte slices.
pub fn concat_bytes<B: AsRef<[u8]>>(values: &[B]) -> Vec<u8> {
    let total = values.iter().map(|v| v.as_ref().len()).sum();
    let mut out = Vec::with_capacity(total);
    for value in values {
        out.extend_from_slice(value.as_ref());
    }
    out
}

/// Fail when `given` bytes do not fit into `size` bytes.
#[inline]
pub(crate) fn assert_size(given: usize, size: Option<usize>) -> Result<(), HexError> {
    match size {
        Some(max_size) if given > max_size => {
            Err(HexError::SizeOverflow { given_size: given, max_size })
        }
        _ => Ok(()),
    }
}

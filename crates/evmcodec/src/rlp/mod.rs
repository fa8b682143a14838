//! Recursive Length Prefix codec over a generic item tree.
//!
//! Spec: <https://ethereum.org/en/developers/docs/data-structures-and-encoding/rlp/>

mod decode;
mod encode;

use alloy_primitives::{Bytes, U256};
use thiserror::Error;

use crate::hex::HexError;

pub use decode::{from_rlp, from_rlp_hex, MAX_DEPTH};
pub use encode::{encode_rlp_into, encoded_len, to_rlp, to_rlp_hex};

pub(crate) use encode::trim_leading_zeros;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("malformed rlp: {0}")]
    Malformed(#[from] alloy_rlp::Error),
    #[error("{0} trailing bytes after rlp item")]
    TrailingBytes(usize),
    #[error("rlp nesting exceeds {MAX_DEPTH} levels")]
    TooDeep,
    #[error(transparent)]
    Hex(#[from] HexError),
}

/// A decoded RLP value: a byte string or a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Bytes),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string, which is also the encoding of integer zero.
    pub const EMPTY: Self = Self::Bytes(Bytes::new());

    /// Byte string item from any slice.
    pub fn bytes(value: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Bytes::copy_from_slice(value.as_ref()))
    }

    /// Canonical integer: big-endian without leading zeros.
    pub fn uint(value: U256) -> Self {
        Self::bytes(trim_leading_zeros(&value.to_be_bytes::<32>()))
    }

    /// Canonical integer from a `u64`.
    pub fn u64(value: u64) -> Self {
        Self::bytes(trim_leading_zeros(&value.to_be_bytes()))
    }

    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            Self::List(items) => Some(items),
            Self::Bytes(_) => None,
        }
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}

impl From<Bytes> for RlpItem {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

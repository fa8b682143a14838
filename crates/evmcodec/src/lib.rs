//! Codec core for Ethereum-family clients.
//!
//! This crate turns typed values into the exact bytes a node expects and back:
//! - Hex/byte conversions with padding, trimming and slicing
//! - Contract ABI encoding and decoding (head/tail layout, nested tuples and arrays)
//! - Function/event selectors and human-readable signature parsing
//! - RLP encoding and decoding
//! - Typed transactions (legacy, EIP-2930, EIP-1559, CIP-42, CIP-64) with signing
//!
//! Nothing here performs I/O; every function is pure.

pub mod abi;
pub mod address;
pub mod hex;
pub mod rlp;
pub mod transaction;

#[cfg(test)]
mod tests;

pub use abi::{
    decode_abi_parameters, encode_abi_parameters, encode_packed, AbiError, AbiValue, Param,
    ParamType,
};
pub use address::{checksum_address, get_address, is_address};
pub use hex::{from_hex, to_hex, HexDecode, HexEncode, HexError};
pub use rlp::{from_rlp, from_rlp_hex, to_rlp, to_rlp_hex, RlpError, RlpItem};
pub use transaction::{
    parse_transaction, serialize_transaction, serialized_transaction_type, sign_transaction,
    AccessList, AccessListItem, Signature, TransactionError, TransactionSerializable, TxCip42,
    TxCip64, TxEip1559, TxEip2930, TxLegacy, TxType,
};

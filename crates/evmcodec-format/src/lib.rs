//! RPC formatting for evmcodec.
//!
//! Converts wire-format JSON objects (hex quantities) into typed [`Field`] values through
//! per-chain [`FieldTable`]s, builds [`TransactionSerializable`](evmcodec::TransactionSerializable)
//! values from transaction requests, and maps JSON to ABI values.

mod abi_json;
mod chain;
mod error;
pub mod field;
mod formatter;
mod request;
mod rlp_json;

#[cfg(test)]
mod tests;

pub use abi_json::{value_from_json, value_to_json};
pub use chain::{ChainFormatters, EntityTables};
pub use error::FormatError;
pub use field::{formatted_to_json, Field, FieldTransform, Formatted};
pub use formatter::{format, Entity, FieldTable, FormatOptions};
pub use request::{request_from_transaction, transaction_from_request};
pub use rlp_json::{rlp_from_json, rlp_to_json};
